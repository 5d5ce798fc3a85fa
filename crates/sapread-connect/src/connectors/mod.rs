//! Connector implementations

pub mod sap;

pub use sap::{SapReadTableConfig, SapReadTableSource};
