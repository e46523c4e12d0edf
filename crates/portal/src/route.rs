//! Paths of the portal endpoints, relative to the API prefix.

pub fn namespace(namespace_id: i64) -> String { format!("namespaces/{namespace_id}") }

pub fn app(namespace_id: i64, app_id: i64) -> String {
    format!("namespaces/{namespace_id}/apps/{app_id}")
}

pub fn service(app_id: i64, service_id: i64) -> String {
    format!("apps/{app_id}/services/{service_id}")
}

pub fn service_templates(app_id: i64) -> String { format!("apps/{app_id}/services/tpls") }

pub fn service_template(app_id: i64, template_id: i64) -> String {
    format!("{}/{template_id}", service_templates(app_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(namespace(2), "namespaces/2");
        assert_eq!(app(2, 5), "namespaces/2/apps/5");
        assert_eq!(service(5, 9), "apps/5/services/9");
        assert_eq!(service_templates(5), "apps/5/services/tpls");
        assert_eq!(service_template(5, 11), "apps/5/services/tpls/11");
    }
}
