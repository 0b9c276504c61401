//! Copias de trabajo temporales junto al archivo original.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Crea un nombre de archivo temporal en el mismo directorio que `path`.
///
/// Se conserva la extensión para que los codificadores que la consultan
/// escriban el mismo formato.
pub(crate) fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    parent.join(format!(
        ".{}_temp_{}_{}_{}.{}",
        stem,
        std::process::id(),
        timestamp,
        sequence,
        extension
    ))
}

/// Archivo temporal hermano que se elimina al soltarse salvo que se confirme.
pub(crate) struct TempSibling {
    target: PathBuf,
    path: PathBuf,
    persisted: bool,
}

impl TempSibling {
    pub(crate) fn for_target(target: &Path) -> Self {
        Self {
            target: target.to_path_buf(),
            path: generate_temp_filename(target),
            persisted: false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Sustituye el archivo destino con un `rename` dentro del mismo directorio.
    ///
    /// El temporal hereda antes los permisos del destino.
    pub(crate) fn persist(mut self) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.target) {
            fs::set_permissions(&self.path, metadata.permissions())?;
        }
        fs::rename(&self.path, &self.target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempSibling {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}
