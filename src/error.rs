//! Taxonomía de errores de clasificación, reescritura y limpieza.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::transaction::Phase;

/// Fallos al reescribir un contenedor ZIP entrada por entrada.
#[derive(Debug, Error)]
pub enum ContainerRewriteError {
    #[error("No se pudo abrir el contenedor {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("No es un contenedor ZIP válido: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Error de E/S durante la reescritura: {0}")]
    Io(#[from] io::Error),

    #[error("La entrada '{entry}' no se pudo transformar: {reason}")]
    Transform { entry: String, reason: String },

    #[error("No se pudo reemplazar {path} con la copia reescrita: {source}")]
    Replace { path: PathBuf, source: io::Error },
}

/// Fallo genérico de un limpiador específico de formato.
#[derive(Debug, Error)]
pub enum StripError {
    #[error("Error de E/S en {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Container(#[from] ContainerRewriteError),

    #[error("XML inválido en '{part}': {reason}")]
    Xml { part: String, reason: String },

    #[error("No se pudo procesar la imagen: {0}")]
    Image(#[from] image::ImageError),

    #[error("No se pudo procesar el PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Los PDF cifrados no están soportados")]
    EncryptedPdf,

    #[error("Contenedor de audio {format} malformado: {reason}")]
    Audio { format: &'static str, reason: String },

    #[error("La verificación encontró metadata residual: {}", .residual.join(", "))]
    Verification { residual: Vec<String> },
}

impl StripError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StripError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn xml(part: impl Into<String>, reason: impl ToString) -> Self {
        StripError::Xml {
            part: part.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn audio(format: &'static str, reason: impl Into<String>) -> Self {
        StripError::Audio {
            format,
            reason: reason.into(),
        }
    }
}

/// Resultado fallido de `clean()`.
///
/// Salvo `RestoreFailed`, todas las variantes garantizan que el archivo
/// original quedó byte a byte como estaba antes de la llamada.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("No se pudo crear la copia de seguridad {backup} de {path}: {source}")]
    BackupFailed {
        path: PathBuf,
        backup: PathBuf,
        source: io::Error,
    },

    #[error("Formato no soportado para {path}{}", detected_suffix(.detected))]
    UnsupportedFormat {
        path: PathBuf,
        detected: Option<String>,
    },

    #[error("No se pudo limpiar {path}: {source}")]
    Strip { path: PathBuf, source: StripError },

    /// Operación de la transacción invocada fuera de su fase; no toca el disco.
    #[error("Transición inválida en {path}: se esperaba {expected:?} y la fase es {actual:?}")]
    InvalidPhase {
        path: PathBuf,
        expected: Phase,
        actual: Phase,
    },

    #[error(
        "No se pudo restaurar {path} desde {backup} ({source}); se requiere recuperación manual. Causa original: {cause}"
    )]
    RestoreFailed {
        path: PathBuf,
        backup: PathBuf,
        source: io::Error,
        cause: Box<CleanError>,
    },
}

impl CleanError {
    /// Indica si el archivo original sigue intacto tras el fallo.
    pub fn original_preserved(&self) -> bool {
        !matches!(self, CleanError::RestoreFailed { .. })
    }
}

fn detected_suffix(detected: &Option<String>) -> String {
    match detected {
        Some(mime) => format!(" (detectado: {mime})"),
        None => String::new(),
    }
}
