use clap::{ArgAction, Args};
use stencil_portal::PortalApi;
use stencil_template::{LoadContext, PortSpec, SelectorEntry, ServiceTemplateForm};

use crate::{
    cli::{Error, error},
    config::Config,
};

#[derive(Args, Clone)]
pub struct FormArgs {
    #[arg(long = "namespace-id", help = "ID of the portal namespace the application belongs to.")]
    pub namespace_id: i64,

    #[arg(long = "app-id", help = "ID of the application owning the service.")]
    pub app_id: i64,

    #[arg(long = "service-id", help = "ID of the service the template belongs to.")]
    pub service_id: i64,

    #[arg(
        long = "template-id",
        help = "ID of an existing template to start from. Without it a new template is authored."
    )]
    pub template_id: Option<i64>,

    #[arg(
        long = "port",
        action = ArgAction::Append,
        help = "Append a port entry written as PORT[:TARGET][/PROTOCOL] (e.g. `80`, \
                `443:https`, `53:5353/UDP`). Can be specified multiple times."
    )]
    pub ports: Vec<PortSpec>,

    #[arg(
        long = "remove-port",
        action = ArgAction::Append,
        help = "Remove the port entry at INDEX, as listed by `show`. Can be specified multiple \
                times."
    )]
    pub remove_ports: Vec<usize>,

    #[arg(
        long = "selector",
        action = ArgAction::Append,
        help = "Append a label selector entry written as KEY=VALUE. Can be specified multiple \
                times; the last value of a repeated key wins."
    )]
    pub selectors: Vec<SelectorEntry>,

    #[arg(
        long = "remove-selector",
        action = ArgAction::Append,
        help = "Remove the selector entry at INDEX, as listed by `show`. Can be specified \
                multiple times."
    )]
    pub remove_selectors: Vec<usize>,

    #[arg(
        long = "headless",
        value_name = "BOOL",
        help = "Whether the service is headless (`clusterIP: None`)."
    )]
    pub headless: Option<bool>,

    #[arg(long = "description", help = "Description stored with the template.")]
    pub description: Option<String>,
}

impl FormArgs {
    pub const fn load_context(&self) -> LoadContext {
        LoadContext {
            namespace_id: self.namespace_id,
            app_id: self.app_id,
            service_id: self.service_id,
            template_id: self.template_id,
        }
    }

    /// Loads the form and applies the command line edits to it.
    pub async fn load_form<A>(
        &self,
        api: &A,
        config: &Config,
    ) -> Result<ServiceTemplateForm, Error>
    where
        A: PortalApi,
    {
        tracing::info!("Loading service template form of service {}", self.service_id);
        let mut form =
            ServiceTemplateForm::load(api, self.load_context(), config.labels.clone()).await?;
        self.apply(&mut form)?;
        Ok(form)
    }

    /// Removals refer to the loaded entries and are applied before additions.
    pub fn apply(&self, form: &mut ServiceTemplateForm) -> Result<(), Error> {
        for index in descending(&self.remove_ports) {
            let len = form.ports().len();
            if form.remove_port(index).is_none() {
                return error::NoSuchPortSnafu { index, len }.fail();
            }
        }
        for index in descending(&self.remove_selectors) {
            let len = form.label_selector().len();
            if form.remove_selector(index).is_none() {
                return error::NoSuchSelectorSnafu { index, len }.fail();
            }
        }

        for port in &self.ports {
            port.apply_to(form.add_port());
        }
        for SelectorEntry { key, value } in &self.selectors {
            form.push_selector(key.clone(), value.clone());
        }
        if let Some(headless) = self.headless {
            form.set_headless(headless);
        }
        if let Some(description) = &self.description {
            form.set_description(Some(description.clone()));
        }

        Ok(())
    }
}

/// Distinct indices, highest first, so earlier removals do not shift later
/// ones.
fn descending(indices: &[usize]) -> Vec<usize> {
    let mut indices = indices.to_vec();
    indices.sort_unstable_by(|a, b| b.cmp(a));
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use k8s_openapi::api::core::v1::Service as KubeService;
    use stencil_portal::{App, Error as PortalError, Namespace, Service, ServiceTemplate};

    use super::*;

    const STORED_TEMPLATE: &str = r#"{
        "spec": {
            "selector": {"app": "app1"},
            "ports": [
                {"port": 80, "protocol": "TCP"},
                {"port": 443, "protocol": "TCP"},
                {"port": 8080, "protocol": "TCP"}
            ]
        }
    }"#;

    struct FakePortal;

    impl PortalApi for FakePortal {
        async fn get_namespace(&self, namespace_id: i64) -> Result<Namespace, PortalError> {
            Ok(Namespace { id: namespace_id, name: "ns1".to_string() })
        }

        async fn get_app(&self, _namespace_id: i64, app_id: i64) -> Result<App, PortalError> {
            Ok(App { id: app_id, name: "app1".to_string(), description: None })
        }

        async fn get_service(&self, app_id: i64, service_id: i64) -> Result<Service, PortalError> {
            Ok(Service {
                id: service_id,
                name: "svc1".to_string(),
                app_id: Some(app_id),
                description: None,
            })
        }

        async fn get_service_template(
            &self,
            _app_id: i64,
            template_id: i64,
        ) -> Result<ServiceTemplate, PortalError> {
            Ok(ServiceTemplate {
                id: Some(template_id),
                name: "svc1".to_string(),
                service_id: 3,
                template: STORED_TEMPLATE.to_string(),
                description: Some("previous version".to_string()),
            })
        }

        async fn create_service_template(
            &self,
            _app_id: i64,
            template: &ServiceTemplate,
        ) -> Result<ServiceTemplate, PortalError> {
            Ok(template.clone())
        }
    }

    async fn load_form(args: &[&str]) -> Result<ServiceTemplateForm, Error> {
        parse(args).load_form(&FakePortal, &Config::default()).await
    }

    fn port_numbers(form: &ServiceTemplateForm) -> Vec<i32> {
        form.ports().iter().map(|port| port.port).collect()
    }

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        form: FormArgs,
    }

    fn parse(args: &[&str]) -> FormArgs {
        let base = ["stencil", "--namespace-id", "1", "--app-id", "2", "--service-id", "3"];
        TestCli::try_parse_from(base.iter().chain(args)).expect("arguments should parse").form
    }

    #[test]
    fn test_descending_dedups() {
        assert_eq!(descending(&[1, 3, 1, 0]), vec![3, 1, 0]);
    }

    #[test]
    fn test_parse_form_args() {
        let args = parse(&[
            "--template-id",
            "11",
            "--port",
            "80",
            "--port",
            "53:5353/UDP",
            "--selector",
            "tier=web",
            "--remove-selector",
            "0",
            "--headless",
            "true",
        ]);

        let context = args.load_context();
        assert_eq!(context.template_id, Some(11));
        assert_eq!(context.namespace_id, 1);
        assert_eq!(args.ports.len(), 2);
        assert_eq!(args.ports[1].port, 53);
        assert_eq!(args.selectors, vec![SelectorEntry::new("tier", "web")]);
        assert_eq!(args.remove_selectors, vec![0]);
        assert_eq!(args.headless, Some(true));
    }

    #[test]
    fn test_reject_malformed_port() {
        let result = TestCli::try_parse_from([
            "stencil",
            "--namespace-id",
            "1",
            "--app-id",
            "2",
            "--service-id",
            "3",
            "--port",
            "eighty",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_removed_seed_selector_is_replaced() {
        let form = load_form(&["--remove-selector", "0", "--selector", "tier=web"])
            .await
            .expect("edits apply");

        assert_eq!(form.label_selector().entries(), &[SelectorEntry::new("tier", "web")]);
    }

    #[tokio::test]
    async fn test_removals_run_highest_index_first() {
        let form = load_form(&[
            "--template-id",
            "11",
            "--remove-port",
            "0",
            "--remove-port",
            "2",
            "--remove-port",
            "2",
            "--port",
            "9090",
        ])
        .await
        .expect("edits apply");

        assert_eq!(port_numbers(&form), vec![443, 9090]);
    }

    #[tokio::test]
    async fn test_added_ports_are_named_on_composition() {
        let form = load_form(&["--port", "80", "--port", "53:5353/UDP"]).await.expect("edits apply");
        let composed: KubeService = form.compose();
        let ports = composed.spec.and_then(|spec| spec.ports).expect("ports are composed");

        assert_eq!(
            ports.iter().map(|port| port.name.as_deref()).collect::<Vec<_>>(),
            vec![Some("svc1-80"), Some("svc1-53")]
        );
        assert_eq!(ports[1].protocol.as_deref(), Some("UDP"));
    }

    #[tokio::test]
    async fn test_out_of_range_port_removal_fails() {
        let err = load_form(&["--remove-port", "0"]).await.expect_err("no port to remove");

        assert!(matches!(err, Error::NoSuchPort { index: 0, len: 0 }));
    }

    #[tokio::test]
    async fn test_out_of_range_selector_removal_fails() {
        let err = load_form(&["--remove-selector", "5"]).await.expect_err("no such selector");

        assert!(matches!(err, Error::NoSuchSelector { index: 5, len: 1 }));
    }

    #[tokio::test]
    async fn test_headless_and_description_apply() {
        let form = load_form(&["--template-id", "11", "--headless", "true", "--description", "v2"])
            .await
            .expect("edits apply");

        assert!(form.headless());
        assert_eq!(form.description(), Some("v2"));

        let form = load_form(&["--template-id", "11"]).await.expect("form loads");
        assert!(!form.headless());
        assert_eq!(form.description(), None);
    }
}
