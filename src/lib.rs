//! Clasificación por contenido y eliminación transaccional de metadata.
//!
//! La biblioteca identifica el formato real de un archivo ([`classify`]) y
//! elimina en sitio la metadata que delata autoría, fechas o herramientas
//! ([`clean`]). Cada limpieza deja el archivo completamente limpio o idéntico
//! byte a byte a como estaba; la única excepción es
//! [`CleanError::RestoreFailed`], que exige recuperación manual.

pub mod batch;
pub mod container;
pub mod error;
pub mod format;
pub mod strip;
pub mod transaction;

pub use error::{CleanError, ContainerRewriteError, StripError};
pub use format::{FormatTag, classify};
pub use transaction::{CleanTransaction, Phase, clean};
