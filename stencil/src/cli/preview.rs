use clap::{Args, ValueEnum};
use snafu::ResultExt;
use stencil_portal::PortalClient;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{Error, error, internal::FormArgs},
    config::Config,
};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Args, Clone)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub form: FormArgs,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Yaml,
        help = "Format of the printed Service document."
    )]
    pub output: OutputFormat,
}

impl PreviewCommand {
    pub async fn run(self, client: PortalClient, config: Config) -> Result<(), Error> {
        let Self { form, output } = self;
        let form = form.load_form(&client, &config).await?;
        let service = form.compose();

        let document = match output {
            OutputFormat::Yaml => serde_yaml::to_string(&service).context(error::SerializeYamlSnafu)?,
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(&service).context(error::SerializeJsonSnafu)?;
                json.push('\n');
                json
            }
        };

        let mut stdout = tokio::io::stdout();
        stdout.write_all(document.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)
    }
}
