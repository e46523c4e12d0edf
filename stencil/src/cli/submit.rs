use clap::Args;
use snafu::ResultExt;
use stencil_portal::PortalClient;
use stencil_template::Submitted;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{Error, error, internal::FormArgs},
    config::Config,
};

#[derive(Args, Clone)]
pub struct SubmitCommand {
    #[command(flatten)]
    pub form: FormArgs,
}

impl SubmitCommand {
    pub async fn run(self, client: PortalClient, config: Config) -> Result<(), Error> {
        let form = self.form.load_form(&client, &config).await?;
        let Submitted { template, detail_route } = form.submit(&client).await?;

        tracing::info!("Created service template {} ({:?})", template.name, template.id);
        let id = template.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let message = format!(
            "servicetemplate/{id} created for service {}\n{detail_route}\n",
            form.service().name
        );

        let mut stdout = tokio::io::stdout();
        stdout.write_all(message.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)
    }
}
