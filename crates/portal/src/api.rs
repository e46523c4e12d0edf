use crate::{App, Error, Namespace, Service, ServiceTemplate};

/// Portal operations needed to author a service template.
pub trait PortalApi {
    async fn get_namespace(&self, namespace_id: i64) -> Result<Namespace, Error>;

    async fn get_app(&self, namespace_id: i64, app_id: i64) -> Result<App, Error>;

    async fn get_service(&self, app_id: i64, service_id: i64) -> Result<Service, Error>;

    async fn get_service_template(
        &self,
        app_id: i64,
        template_id: i64,
    ) -> Result<ServiceTemplate, Error>;

    /// Stores `template` as a new template of its service and returns the
    /// stored record.
    async fn create_service_template(
        &self,
        app_id: i64,
        template: &ServiceTemplate,
    ) -> Result<ServiceTemplate, Error>;
}
