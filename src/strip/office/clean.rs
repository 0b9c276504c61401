use std::path::Path;

use log::{debug, info};

use crate::container::rewrite_zip_to;
use crate::error::StripError;
use crate::strip::utils::TempSibling;

use super::parts::{OfficeFamily, part_role};
use super::sanitize::sanitize_part;
use super::verify::verify_office_metadata_clean;

/// Elimina metadata sensible de documentos Office y mantiene el contenido original intacto.
///
/// Propiedades de documento, propiedades extendidas, propiedades
/// personalizadas, comentarios, notas y anotaciones de diapositivas se limpian
/// en una sola pasada sobre una copia temporal, que se verifica antes de
/// reemplazar el original.
pub fn remove_office_metadata(path: &Path, family: OfficeFamily) -> Result<(), StripError> {
    debug!("Eliminando metadata de documento Office {:?}: {}", family, path.display());

    let temp = TempSibling::for_target(path);
    let cleaned = rewrite_zip_to(path, temp.path(), |name, contents| {
        sanitize_part(part_role(family, name), name, contents)
    })?;

    let residual = verify_office_metadata_clean(temp.path(), family)?;
    if !residual.is_empty() {
        return Err(StripError::Verification { residual });
    }

    temp.persist().map_err(|e| StripError::io(path, e))?;

    if cleaned > 0 {
        info!("{} partes saneadas en {}", cleaned, path.display());
    } else {
        info!("No se detectó metadata sensible en {}", path.display());
    }
    Ok(())
}
