//! Board import/export.
//!
//! Exports are the pretty-printed column list; imports accept the same
//! document (or a legacy one) after structural validation.

pub mod exporter;
pub mod importer;

pub use exporter::BoardExporter;
pub use importer::BoardImporter;
