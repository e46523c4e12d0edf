use comfy_table::{Cell, ContentArrangement};
use k8s_openapi::{api::core::v1::ServicePort, apimachinery::pkg::util::intstr::IntOrString};

pub trait PortListExt {
    fn render_table(&self) -> String;
}

impl PortListExt for [ServicePort] {
    fn render_table(&self) -> String {
        let rows = self.iter().enumerate().map(port_column).collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "NAME", "PORT", "TARGET PORT", "PROTOCOL", "NODE PORT"])
            .add_rows(rows)
            .to_string()
    }
}

/// Columns of one port; unset optional fields render empty.
fn port_column((index, port): (usize, &ServicePort)) -> [Cell; 6] {
    let target_port = match &port.target_port {
        Some(IntOrString::Int(value)) => value.to_string(),
        Some(IntOrString::String(value)) => value.clone(),
        None => String::new(),
    };
    [
        Cell::new(index),
        Cell::new(port.name.as_deref().unwrap_or_default()),
        Cell::new(port.port),
        Cell::new(target_port),
        Cell::new(port.protocol.as_deref().unwrap_or_default()),
        Cell::new(port.node_port.map(|port| port.to_string()).unwrap_or_default()),
    ]
}
