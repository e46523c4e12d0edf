use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Service as KubeService, ServicePort, ServiceSpec};
use serde_json::{Map, Value};
use snafu::ResultExt;
use stencil_base::consts::k8s::{labels, service::HEADLESS_CLUSTER_IP};
use stencil_portal::{App, Namespace, PortalApi, Service, ServiceTemplate};

use crate::{
    Error, InFlight, LabelKeys, LabelSelector, SelectorEntry, default_port, default_service,
    error, merge_defaults, port_name,
};

/// Whether a form authors a new template or starts from a stored one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionType {
    /// The form starts from the default Service skeleton.
    AddNew,

    /// The form starts from a stored template merged onto the skeleton.
    Edit,
}

/// Identifies what a form is loaded for.
///
/// A present `template_id` switches the form into edit mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoadContext {
    /// Portal namespace the application belongs to.
    pub namespace_id: i64,

    /// Application owning the service.
    pub app_id: i64,

    /// Portal service the template belongs to.
    pub service_id: i64,

    /// Stored template to edit; `None` authors a new one.
    pub template_id: Option<i64>,
}

impl LoadContext {
    /// Returns [`ActionType::Edit`] when a template id is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil_template::{ActionType, LoadContext};
    ///
    /// let context = LoadContext { namespace_id: 1, app_id: 2, service_id: 3, template_id: None };
    /// assert_eq!(context.action_type(), ActionType::AddNew);
    ///
    /// let context = LoadContext { template_id: Some(11), ..context };
    /// assert_eq!(context.action_type(), ActionType::Edit);
    /// ```
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        if self.template_id.is_some() { ActionType::Edit } else { ActionType::AddNew }
    }
}

/// Outcome of a successful submission.
#[derive(Clone, Debug)]
pub struct Submitted {
    /// The template record stored by the portal.
    pub template: ServiceTemplate,

    /// Portal route of the service the template belongs to.
    pub detail_route: String,
}

/// Editable state of a service template.
#[derive(Debug)]
pub struct ServiceTemplateForm {
    action_type: ActionType,
    namespace: Namespace,
    app: App,
    service: Service,
    template: ServiceTemplate,
    kube_service: KubeService,
    label_selector: LabelSelector,
    headless: bool,
    label_keys: LabelKeys,
    in_flight: InFlight,
}

impl ServiceTemplateForm {
    /// Fetches the namespace, application, service and, in edit mode, the
    /// stored template, then builds the form from them.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any of the requests fails or the stored template
    /// document cannot be decoded.
    pub async fn load<A>(api: &A, context: LoadContext, label_keys: LabelKeys) -> Result<Self, Error>
    where
        A: PortalApi,
    {
        let LoadContext { namespace_id, app_id, service_id, template_id } = context;
        let template = async {
            match template_id {
                Some(template_id) => api.get_service_template(app_id, template_id).await.map(Some),
                None => Ok(None),
            }
        };

        let (namespace, app, service, template) = futures::try_join!(
            api.get_namespace(namespace_id),
            api.get_app(namespace_id, app_id),
            api.get_service(app_id, service_id),
            template,
        )
        .context(error::LoadSnafu)?;

        tracing::info!(
            "Loaded service {} of app {} in namespace {}",
            service.name,
            app.name,
            namespace.name
        );

        match template {
            Some(template) => Self::edit(namespace, app, service, template, label_keys),
            None => Ok(Self::create(namespace, app, service, label_keys)),
        }
    }

    fn create(namespace: Namespace, app: App, service: Service, label_keys: LabelKeys) -> Self {
        let mut label_selector = LabelSelector::new();
        label_selector.push(label_keys.selector_app_key.clone(), app.name.clone());

        Self {
            action_type: ActionType::AddNew,
            namespace,
            app,
            service,
            template: ServiceTemplate::default(),
            kube_service: default_service(),
            label_selector,
            headless: false,
            label_keys,
            in_flight: InFlight::new(),
        }
    }

    fn edit(
        namespace: Namespace,
        app: App,
        service: Service,
        template: ServiceTemplate,
        label_keys: LabelKeys,
    ) -> Result<Self, Error> {
        let stored = decode_stored_service(&template.template).context(
            error::DecodeTemplateSnafu { template_id: template.id.unwrap_or_default() },
        )?;
        let kube_service = merge_defaults(default_service(), stored);

        let spec = kube_service.spec.as_ref();
        let headless =
            spec.and_then(|spec| spec.cluster_ip.as_deref()) == Some(HEADLESS_CLUSTER_IP);
        let label_selector = spec
            .and_then(|spec| spec.selector.as_ref())
            .map(LabelSelector::from_map)
            .unwrap_or_default();

        Ok(Self {
            action_type: ActionType::Edit,
            namespace,
            app,
            service,
            template: ServiceTemplate { description: None, ..template },
            kube_service,
            label_selector,
            headless,
            label_keys,
            in_flight: InFlight::new(),
        })
    }

    #[must_use]
    pub const fn action_type(&self) -> ActionType { self.action_type }

    #[must_use]
    pub const fn namespace(&self) -> &Namespace { &self.namespace }

    #[must_use]
    pub const fn app(&self) -> &App { &self.app }

    #[must_use]
    pub const fn service(&self) -> &Service { &self.service }

    /// The edited document, before composition.
    #[must_use]
    pub const fn kube_service(&self) -> &KubeService { &self.kube_service }

    /// The selector entries in editing order, duplicates included.
    #[must_use]
    pub const fn label_selector(&self) -> &LabelSelector { &self.label_selector }

    /// The port entries of the edited document, unnamed until composition.
    #[must_use]
    pub fn ports(&self) -> &[ServicePort] {
        self.kube_service.spec.as_ref().and_then(|spec| spec.ports.as_deref()).unwrap_or_default()
    }

    #[must_use]
    pub const fn headless(&self) -> bool { self.headless }

    #[must_use]
    pub fn description(&self) -> Option<&str> { self.template.description.as_deref() }

    /// Whether a submission of this form is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool { self.in_flight.is_active() }

    /// Appends a TCP port entry and returns it for editing.
    pub fn add_port(&mut self) -> &mut ServicePort {
        let ports = self
            .kube_service
            .spec
            .get_or_insert_with(ServiceSpec::default)
            .ports
            .get_or_insert_with(Vec::new);
        let index = ports.len();
        ports.push(default_port());
        &mut ports[index]
    }

    /// Removes the port entry at `index`, or returns `None` when out of range.
    pub fn remove_port(&mut self, index: usize) -> Option<ServicePort> {
        let ports = self.kube_service.spec.as_mut()?.ports.as_mut()?;
        (index < ports.len()).then(|| ports.remove(index))
    }

    /// Appends a blank selector entry and returns it for editing.
    pub fn add_selector(&mut self) -> &mut SelectorEntry { self.label_selector.push_blank() }

    pub fn push_selector(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.label_selector.push(key, value);
    }

    /// Removes the selector entry at `index`, or returns `None` when out of
    /// range.
    pub fn remove_selector(&mut self, index: usize) -> Option<SelectorEntry> {
        self.label_selector.remove(index)
    }

    /// Headless services are composed with `clusterIP: None`; otherwise the
    /// cluster IP is left for Kubernetes to assign.
    pub const fn set_headless(&mut self, headless: bool) { self.headless = headless; }

    pub fn set_description(&mut self, description: Option<String>) {
        self.template.description = description;
    }

    /// Portal route showing the service this form belongs to.
    #[must_use]
    pub fn detail_route(&self) -> String {
        format!(
            "portal/namespace/{}/app/{}/service/{}",
            self.namespace.id, self.app.id, self.service.id
        )
    }

    /// Builds the Service document that would be submitted.
    ///
    /// The edited document is left untouched.
    #[must_use]
    pub fn compose(&self) -> KubeService {
        let Self { namespace, app, service, kube_service, label_selector, headless, label_keys, .. } =
            self;
        let mut kube_service = kube_service.clone();

        let spec = kube_service.spec.get_or_insert_with(ServiceSpec::default);
        if !label_selector.is_empty() {
            let duplicates = label_selector.duplicate_keys();
            if !duplicates.is_empty() {
                tracing::warn!(
                    "Selector keys [{}] are repeated, only the last value of each is kept",
                    duplicates.join(", ")
                );
            }
            spec.selector = Some(label_selector.to_map());
        }
        spec.cluster_ip = headless.then(|| HEADLESS_CLUSTER_IP.to_string());
        for port in spec.ports.iter_mut().flatten() {
            port.name = Some(port_name(&service.name, port.port));
        }

        kube_service.metadata.name = Some(service.name.clone());
        kube_service.metadata.labels.get_or_insert_with(BTreeMap::new).extend([
            (label_keys.app_key.clone(), app.name.clone()),
            (label_keys.namespace_key.clone(), namespace.name.clone()),
            (labels::APP.to_string(), service.name.clone()),
        ]);

        kube_service
    }

    /// Builds the template record that would be submitted.
    ///
    /// # Errors
    ///
    /// Fails if the composed document cannot be serialized.
    pub fn compose_template(&self) -> Result<ServiceTemplate, Error> {
        let template = serde_json::to_string(&self.compose())
            .context(error::EncodeTemplateSnafu { service_name: self.service.name.clone() })?;

        Ok(ServiceTemplate {
            id: None,
            name: self.service.name.clone(),
            service_id: self.service.id,
            template,
            description: self.template.description.clone(),
        })
    }

    /// Submits the composed document as a new template of the service.
    ///
    /// At most one submission of a form is outstanding at a time; a
    /// submission attempted meanwhile sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubmissionInProgress`] while another submission is
    /// outstanding, or the failure of the create request.
    pub async fn submit<A>(&self, api: &A) -> Result<Submitted, Error>
    where
        A: PortalApi,
    {
        let service_name = self.service.name.clone();
        let Some(_in_flight) = self.in_flight.try_acquire() else {
            return error::SubmissionInProgressSnafu { service_name }.fail();
        };

        let template = self.compose_template()?;
        tracing::info!("Creating service template {service_name} of app {}", self.app.name);
        let template = api
            .create_service_template(self.app.id, &template)
            .await
            .context(error::SubmitSnafu { service_name })?;

        Ok(Submitted { template, detail_route: self.detail_route() })
    }
}

/// Decodes a stored Service document.
///
/// Port entries saved without a number, with a `null` number or with a number
/// written as a string are normalized before the document is typed; a missing
/// port number decodes as `0`.
fn decode_stored_service(document: &str) -> Result<KubeService, serde_json::Error> {
    let mut value = serde_json::from_str::<Value>(document)?;
    if let Some(ports) = value.pointer_mut("/spec/ports").and_then(Value::as_array_mut) {
        for port in ports.iter_mut().filter_map(Value::as_object_mut) {
            normalize_port_number(port, "port");
            normalize_port_number(port, "nodePort");
        }
    }
    serde_json::from_value(value)
}

fn normalize_port_number(port: &mut Map<String, Value>, key: &str) {
    let normalized = match port.get(key) {
        Some(Value::Null) => None,
        Some(Value::String(number)) => match number.trim().parse::<i32>() {
            Ok(number) => Some(Value::from(number)),
            Err(_) => return,
        },
        _ => return,
    };

    match normalized {
        Some(number) => {
            let _previous = port.insert(key.to_string(), number);
        }
        None => {
            let _removed = port.remove(key);
        }
    }
}
