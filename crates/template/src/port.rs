use std::{fmt, num::NonZeroU16, str::FromStr};

use k8s_openapi::{
    api::core::v1::ServicePort, apimachinery::pkg::util::intstr::IntOrString,
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

/// Name given to a port of `service_name` at composition time.
#[must_use]
pub fn port_name(service_name: &str, port: i32) -> String { format!("{service_name}-{port}") }

/// Transport protocol of a service port.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// The Kubernetes default.
    #[default]
    Tcp,

    Udp,

    Sctp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        };
        f.write_str(val)
    }
}

impl FromStr for Protocol {
    type Err = ParsePortSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "sctp" => Ok(Self::Sctp),
            _ => InvalidProtocolSnafu { value }.fail(),
        }
    }
}

/// A port entry written as `PORT[:TARGET][/PROTOCOL]`.
///
/// `TARGET` is either a number or the name of a container port.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortSpec {
    pub port: u16,

    pub target_port: Option<IntOrString>,

    pub protocol: Protocol,
}

impl PortSpec {
    /// Writes this entry into a form port.
    pub fn apply_to(&self, service_port: &mut ServicePort) {
        let Self { port, target_port, protocol } = self;
        service_port.port = i32::from(*port);
        service_port.target_port.clone_from(target_port);
        service_port.protocol = Some(protocol.to_string());
    }
}

impl FromStr for PortSpec {
    type Err = ParsePortSpecError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (ports, protocol) = match input.split_once('/') {
            Some((ports, protocol)) => (ports, protocol.parse::<Protocol>()?),
            None => (input, Protocol::default()),
        };

        let (port, target) = match ports.split_once(':') {
            Some((port, target)) => (port, Some(target)),
            None => (ports, None),
        };
        if port.is_empty() || target.is_some_and(str::is_empty) {
            return InvalidFormatSnafu { input }.fail();
        }

        let port = port.parse::<NonZeroU16>().context(InvalidPortSnafu { value: port })?.get();
        let target_port = target.map(parse_target_port).transpose()?;

        Ok(Self { port, target_port, protocol })
    }
}

/// A target made of digits is a port number, anything else names a
/// container port.
fn parse_target_port(target: &str) -> Result<IntOrString, ParsePortSpecError> {
    if target.bytes().all(|byte| byte.is_ascii_digit()) {
        let port = target.parse::<NonZeroU16>().context(InvalidPortSnafu { value: target })?;
        Ok(IntOrString::Int(i32::from(port.get())))
    } else {
        Ok(IntOrString::String(target.to_string()))
    }
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum ParsePortSpecError {
    /// The entry lacks a port, or has an empty target after `:`.
    #[snafu(display("Invalid format: expected 'PORT[:TARGET][/PROTOCOL]', got '{input}'"))]
    InvalidFormat { input: String },

    /// A port number is not within `1..=65535`.
    #[snafu(display("Invalid port value '{value}': {source}"))]
    InvalidPort { value: String, source: std::num::ParseIntError },

    /// The protocol is none of TCP, UDP or SCTP.
    #[snafu(display("'{value}' is not a valid protocol, expected TCP, UDP or SCTP"))]
    InvalidProtocol { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_name() {
        assert_eq!(port_name("svc1", 8080), "svc1-8080");
    }

    #[test]
    fn test_parse_port_only() {
        let spec: PortSpec = "80".parse().expect("Should parse bare port");
        assert_eq!(spec, PortSpec { port: 80, target_port: None, protocol: Protocol::Tcp });
    }

    #[test]
    fn test_parse_numeric_target_and_protocol() {
        let spec: PortSpec = "53:5353/udp".parse().expect("Should parse full spec");
        assert_eq!(spec.port, 53);
        assert_eq!(spec.target_port, Some(IntOrString::Int(5353)));
        assert_eq!(spec.protocol, Protocol::Udp);
    }

    #[test]
    fn test_parse_named_target() {
        let spec: PortSpec = "443:https".parse().expect("Should parse named target");
        assert_eq!(spec.target_port, Some(IntOrString::String("https".to_string())));
    }

    #[test]
    fn test_error_invalid_port() {
        let err = "http:80".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidPort { .. }));

        let err = "70000".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidPort { .. }));
    }

    #[test]
    fn test_error_zero_port() {
        let err = "0".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidPort { ref value, .. } if value == "0"));

        let err = "80:0".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidPort { ref value, .. } if value == "0"));

        let err = "80:70000/TCP".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidPort { .. }));
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let spec: PortSpec = " 8080:http ".parse().expect("Should parse padded spec");
        assert_eq!(spec.port, 8080);
        assert_eq!(spec.target_port, Some(IntOrString::String("http".to_string())));
    }

    #[test]
    fn test_error_invalid_format() {
        let err = "80:/TCP".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, ParsePortSpecError::InvalidFormat { .. }));
    }

    #[test]
    fn test_error_invalid_protocol() {
        let err = "80/http".parse::<PortSpec>().unwrap_err();
        assert_eq!(err, ParsePortSpecError::InvalidProtocol { value: "http".to_string() });
    }

    #[test]
    fn test_apply_to_service_port() {
        let mut service_port = crate::default_port();
        "8080:http/TCP".parse::<PortSpec>().expect("valid spec").apply_to(&mut service_port);

        assert_eq!(service_port.port, 8080);
        assert_eq!(service_port.target_port, Some(IntOrString::String("http".to_string())));
        assert_eq!(service_port.protocol.as_deref(), Some("TCP"));
        assert_eq!(service_port.name, None);
    }
}
