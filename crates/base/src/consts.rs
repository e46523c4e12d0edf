pub mod k8s {
    pub mod labels {
        /// Fixed label set to the portal service name on every composed
        /// service.
        pub const APP: &str = "app";

        pub const DEFAULT_APP_KEY: &str = "portal-app";
        pub const DEFAULT_NAMESPACE_KEY: &str = "portal-ns";
        pub const DEFAULT_SELECTOR_APP_KEY: &str = "app";
    }

    pub mod service {
        /// `spec.clusterIP` value of a headless service.
        pub const HEADLESS_CLUSTER_IP: &str = "None";

        pub const DEFAULT_TYPE: &str = "ClusterIP";
        pub const DEFAULT_SESSION_AFFINITY: &str = "None";
        pub const DEFAULT_PORT_PROTOCOL: &str = "TCP";
    }
}

pub mod portal {
    pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
    pub const API_PREFIX: &str = "api/v1";
}
