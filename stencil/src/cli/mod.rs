//! The `stencil` command line authors service templates of a deployment
//! portal.
//!
//! A service template wraps the Kubernetes Service of one portal service.
//! Every command loads the template form (a new one, or an existing template
//! with `--template-id`), applies the edits given as flags and then shows,
//! previews or submits the result.
//!
//! # Examples
//!
//! ```bash
//! # Inspect the form of a new template
//! stencil show --namespace-id 1 --app-id 2 --service-id 3
//!
//! # Print the Service an edited template would produce
//! stencil preview --namespace-id 1 --app-id 2 --service-id 3 --template-id 11 --port 8080
//!
//! # Store a headless variant as a new template
//! stencil submit --namespace-id 1 --app-id 2 --service-id 3 --port 80 --headless true
//! ```

pub mod error;
mod internal;
mod preview;
mod show;
mod submit;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use snafu::ResultExt;
use stencil_base::CLI_PROGRAM_NAME;
use stencil_portal::PortalClient;
use tokio::runtime::Runtime;

pub use self::error::Error;
use self::{preview::PreviewCommand, show::ShowCommand, submit::SubmitCommand};
use crate::{config::Config, shadow};

/// Entry point of the Stencil command line.
#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "Stencil CLI: author Kubernetes service templates of a deployment portal.",
    long_about = "Stencil loads the service template form of a portal service, applies the \
                  edits given on the command line and shows, previews or submits the \
                  composed Kubernetes Service.",
    color = clap::ColorChoice::Always
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "STENCIL_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/stencil/config.yaml or \
                STENCIL_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "STENCIL_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,

    #[clap(
        long = "endpoint",
        env = "STENCIL_PORTAL_ENDPOINT",
        help = "Base URL of the portal, overriding the configuration file."
    )]
    endpoint: Option<String>,

    #[clap(
        long = "token",
        env = "STENCIL_PORTAL_TOKEN",
        hide_env_values = true,
        help = "Bearer token for the portal API, overriding the configuration file."
    )]
    token: Option<String>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display version information")]
    Version,

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(alias = "s", about = "Show the selectors and ports of a service template form")]
    Show(ShowCommand),

    #[command(alias = "p", about = "Print the Kubernetes Service a service template would produce")]
    Preview(PreviewCommand),

    #[command(about = "Submit the service template form as a new template of the service")]
    Submit(SubmitCommand),
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the configuration file and applies the command line overrides.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = Config::load_or_default(
            self.config_file.clone().unwrap_or_else(Config::search_config_file_path),
        )?;

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }
        if let Some(endpoint) = &self.endpoint {
            config.portal.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &self.token {
            config.portal.token = Some(token.clone());
        }

        Ok(config)
    }

    /// Runs the parsed command and returns the process exit code.
    ///
    /// # Panics
    ///
    /// Panics if writing version or help text to the terminal fails.
    pub fn run(self) -> Result<i32, Error> {
        match self.commands {
            Some(Commands::Version) => {
                std::io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .expect("Failed to write to stdout");
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template_basic()?.as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        let client = PortalClient::new(config.portal.endpoint.clone(), config.portal.token.clone())?;
        tracing::debug!("Using portal at {}", client.endpoint());
        let fut = async move {
            match self.commands {
                Some(Commands::Show(cmd)) => cmd.run(client, config).await?,
                Some(Commands::Preview(cmd)) => cmd.run(client, config).await?,
                Some(Commands::Submit(cmd)) => cmd.run(client, config).await?,
                _ => {
                    let help = Self::command().render_long_help().ansi().to_string();
                    std::io::stderr()
                        .write_all(help.as_bytes())
                        .expect("Failed to write to stderr");
                    return Ok(-1);
                }
            }

            Ok(0)
        };

        Runtime::new().context(error::InitializeTokioRuntimeSnafu)?.block_on(fut)
    }
}
