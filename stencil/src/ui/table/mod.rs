//! Table views of the editable parts of a service template form.

mod port_ext;
mod selector_ext;

pub use self::{port_ext::PortListExt, selector_ext::LabelSelectorExt};
