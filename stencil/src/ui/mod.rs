//! Terminal rendering of form state.

pub mod table;
