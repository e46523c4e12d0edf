use clap::Args;
use snafu::ResultExt;
use stencil_portal::PortalClient;
use stencil_template::{ActionType, ServiceTemplateForm};
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{Error, error, internal::FormArgs},
    config::Config,
    ui::table::{LabelSelectorExt, PortListExt},
};

#[derive(Args, Clone)]
pub struct ShowCommand {
    #[command(flatten)]
    pub form: FormArgs,
}

impl ShowCommand {
    pub async fn run(self, client: PortalClient, config: Config) -> Result<(), Error> {
        let form = self.form.load_form(&client, &config).await?;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(render_form(&form).as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)
    }
}

fn render_form(form: &ServiceTemplateForm) -> String {
    let mode = match form.action_type() {
        ActionType::AddNew => "create",
        ActionType::Edit => "edit",
    };
    let mut out = format!(
        "Namespace:   {}\nApp:         {}\nService:     {}\nMode:        {mode}\nHeadless:    \
         {}\nDescription: {}\n",
        form.namespace().name,
        form.app().name,
        form.service().name,
        form.headless(),
        form.description().unwrap_or_default(),
    );

    let duplicates = form.label_selector().duplicate_keys();
    out.push_str("\nSelectors:\n");
    out.push_str(&form.label_selector().render_table());
    out.push('\n');
    if !duplicates.is_empty() {
        out.push_str(&format!(
            "Note: repeated selector keys [{}] keep only their last value\n",
            duplicates.join(", ")
        ));
    }

    out.push_str("\nPorts:\n");
    out.push_str(&form.ports().render_table());
    out.push('\n');
    out
}
