//! Utilidades para limpiar metadata de documentos Office basados en ZIP.

mod clean;
mod parts;
mod sanitize;
mod verify;
mod xml;

pub use clean::remove_office_metadata;
pub use parts::OfficeFamily;
pub use verify::verify_office_metadata_clean;
