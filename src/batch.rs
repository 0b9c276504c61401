//! Limpieza por lote de directorios completos con eventos de progreso.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::format::classify;
use crate::transaction::clean;

const BACKUP_EXTENSION: &str = "bak";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CleanupEvent {
    Started {
        total: usize,
    },
    Processing {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    Success {
        path: PathBuf,
    },
    Failure {
        path: PathBuf,
        error: String,
        original_preserved: bool,
    },
    Finished {
        successes: usize,
        failures: usize,
    },
}

/// Recuento final de un lote.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CleanupSummary {
    pub successes: usize,
    pub failures: usize,
    /// Fallos en los que el original no pudo restaurarse.
    pub unrecovered: usize,
}

/// Archivos de `root` cuyo contenido corresponde a un formato soportado.
///
/// La selección se hace por contenido, no por extensión. Las copias `.bak`
/// que haya dejado una limpieza anterior nunca se incluyen.
pub fn collect_candidate_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, String> {
    if !root.is_dir() {
        return Err("La ruta proporcionada no es un directorio".to_string());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Entrada inválida en {}: {}", root.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() || is_backup(entry.path()) {
            continue;
        }

        let tag = classify(entry.path());
        if tag.is_supported() {
            files.push(entry.into_path());
        } else {
            debug!("Omitido (sin formato soportado): {}", entry.path().display());
        }
    }

    Ok(files)
}

fn is_backup(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(BACKUP_EXTENSION))
}

/// Limpia `files` de uno en uno y notifica el progreso por `sender`.
///
/// Un receptor desconectado no detiene el lote.
pub fn run_cleanup_with_sender(files: Vec<PathBuf>, sender: Sender<CleanupEvent>) -> CleanupSummary {
    let total = files.len();
    let _ = sender.send(CleanupEvent::Started { total });

    let mut summary = CleanupSummary::default();

    for (index, path) in files.into_iter().enumerate() {
        let _ = sender.send(CleanupEvent::Processing {
            index: index + 1,
            total,
            path: path.clone(),
        });

        match clean(&path) {
            Ok(()) => {
                summary.successes += 1;
                let _ = sender.send(CleanupEvent::Success { path });
            }
            Err(error) => {
                summary.failures += 1;
                let original_preserved = error.original_preserved();
                if !original_preserved {
                    summary.unrecovered += 1;
                }
                let _ = sender.send(CleanupEvent::Failure {
                    path,
                    error: error.to_string(),
                    original_preserved,
                });
            }
        }
    }

    let _ = sender.send(CleanupEvent::Finished {
        successes: summary.successes,
        failures: summary.failures,
    });
    summary
}
