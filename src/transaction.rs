//! Limpieza transaccional: copia de seguridad, limpieza y confirmación o restauración.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::error::{CleanError, StripError};
use crate::format::{classify, mime_hint};
use crate::strip::{FormatFamily, strip_metadata};

const BACKUP_SUFFIX: &str = ".bak";

/// Fase de una transacción de limpieza.
///
/// La copia de seguridad existe en disco durante `BackedUp` y `Stripping`.
/// Tras `Committed` sólo queda si no pudo borrarse, lo que se registra como
/// aviso; tras `RolledBack` el original ya fue restaurado desde ella.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    NotStarted,
    BackedUp,
    Stripping,
    Committed,
    RolledBack,
}

/// Registro efímero de una llamada a `clean()` sobre una ruta.
#[derive(Debug)]
pub struct CleanTransaction {
    original_path: PathBuf,
    backup_path: PathBuf,
    phase: Phase,
}

impl CleanTransaction {
    pub fn new(path: &Path) -> Self {
        Self {
            original_path: path.to_path_buf(),
            backup_path: backup_path_for(path),
            phase: Phase::NotStarted,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// `NotStarted → BackedUp`: copia byte a byte el original junto a él.
    ///
    /// Si ya existe un archivo con el nombre de la copia no se sobrescribe.
    pub fn back_up(&mut self) -> Result<(), CleanError> {
        self.require(Phase::NotStarted)?;

        let fail = |source: io::Error| CleanError::BackupFailed {
            path: self.original_path.clone(),
            backup: self.backup_path.clone(),
            source,
        };

        let mut source = File::open(&self.original_path).map_err(fail)?;
        let permissions = source.metadata().map_err(fail)?.permissions();
        let mut backup = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.backup_path)
            .map_err(fail)?;

        let copied = io::copy(&mut source, &mut backup)
            .and_then(|_| backup.sync_all())
            .and_then(|_| fs::set_permissions(&self.backup_path, permissions));
        if let Err(err) = copied {
            drop(backup);
            let _ = fs::remove_file(&self.backup_path);
            return Err(fail(err));
        }

        self.phase = Phase::BackedUp;
        debug!("Copia de seguridad creada: {}", self.backup_path.display());
        Ok(())
    }

    /// `BackedUp → Stripping`.
    pub fn begin_stripping(&mut self) -> Result<(), CleanError> {
        self.require(Phase::BackedUp)?;
        self.phase = Phase::Stripping;
        Ok(())
    }

    /// `Stripping → Committed`: descarta la copia de seguridad.
    ///
    /// El original ya está limpio, así que un fallo al borrar la copia no
    /// revierte nada: la copia queda en disco y se emite un aviso.
    pub fn commit(&mut self) -> Result<(), CleanError> {
        self.require(Phase::Stripping)?;
        if let Err(err) = fs::remove_file(&self.backup_path) {
            warn!(
                "{} quedó limpio pero la copia {} sigue en disco: {}",
                self.original_path.display(),
                self.backup_path.display(),
                err
            );
        }
        self.phase = Phase::Committed;
        info!("Metadata eliminada: {}", self.original_path.display());
        Ok(())
    }

    /// `BackedUp | Stripping → RolledBack`: devuelve el original a su estado previo.
    ///
    /// Si la restauración falla, la copia de seguridad se conserva, la fase no
    /// avanza y se devuelve `RestoreFailed` con `cause` como contexto. En
    /// cualquier otra fase no hay copia que restaurar: el disco no se toca y
    /// `cause` se devuelve tal cual.
    pub fn roll_back(&mut self, cause: CleanError) -> CleanError {
        if !matches!(self.phase, Phase::BackedUp | Phase::Stripping) {
            warn!(
                "Sin copia que restaurar para {} en la fase {:?}",
                self.original_path.display(),
                self.phase
            );
            return cause;
        }
        warn!(
            "Restaurando {} tras un fallo: {}",
            self.original_path.display(),
            cause
        );

        match self.restore() {
            Ok(()) => {
                self.phase = Phase::RolledBack;
                cause
            }
            Err(source) => {
                error!(
                    "No se pudo restaurar {}; la copia sigue en {}: {}",
                    self.original_path.display(),
                    self.backup_path.display(),
                    source
                );
                CleanError::RestoreFailed {
                    path: self.original_path.clone(),
                    backup: self.backup_path.clone(),
                    source,
                    cause: Box::new(cause),
                }
            }
        }
    }

    fn require(&self, expected: Phase) -> Result<(), CleanError> {
        if self.phase == expected {
            return Ok(());
        }
        Err(CleanError::InvalidPhase {
            path: self.original_path.clone(),
            expected,
            actual: self.phase,
        })
    }

    // Un rename dentro del directorio restaura y elimina la copia en un paso;
    // si no es posible se copia de vuelta y luego se borra.
    fn restore(&self) -> io::Result<()> {
        if fs::rename(&self.backup_path, &self.original_path).is_ok() {
            return Ok(());
        }
        fs::copy(&self.backup_path, &self.original_path)?;
        if let Err(err) = fs::remove_file(&self.backup_path) {
            warn!(
                "Original restaurado pero no se pudo borrar {}: {}",
                self.backup_path.display(),
                err
            );
        }
        Ok(())
    }
}

/// Ruta de la copia de seguridad: la ruta original con `.bak` añadido.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Elimina la metadata de `path` en sitio, con todo o nada.
///
/// Al volver, el archivo está completamente limpio o es idéntico byte a byte al
/// de antes de la llamada. La única excepción es `CleanError::RestoreFailed`.
/// Dos llamadas concurrentes sobre la misma ruta no son seguras.
pub fn clean(path: &Path) -> Result<(), CleanError> {
    clean_with(path, strip_metadata)
}

/// Igual que [`clean`], con la estrategia de limpieza inyectada.
pub(crate) fn clean_with<S>(path: &Path, strip: S) -> Result<(), CleanError>
where
    S: FnOnce(&Path, FormatFamily) -> Result<(), StripError>,
{
    let mut transaction = CleanTransaction::new(path);
    transaction.back_up()?;
    transaction.begin_stripping()?;

    let tag = classify(path);
    debug!("{} clasificado como {}", path.display(), tag);

    let outcome = match FormatFamily::from_tag(tag) {
        Some(family) => strip(path, family).map_err(|source| CleanError::Strip {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(CleanError::UnsupportedFormat {
            path: path.to_path_buf(),
            detected: mime_hint(path),
        }),
    };

    match outcome {
        Ok(()) => transaction.commit(),
        Err(cause) => Err(transaction.roll_back(cause)),
    }
}
