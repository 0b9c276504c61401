//! Limpieza del diccionario Info y del flujo XMP de documentos PDF.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::StripError;
use crate::strip::utils::TempSibling;

/// Vacía el diccionario Info y elimina `/Metadata` del catálogo.
///
/// El flujo XMP que queda huérfano se poda para que sus bytes no lleguen al
/// archivo final. Los PDF cifrados se rechazan.
pub fn remove_pdf_metadata(path: &Path) -> Result<(), StripError> {
    debug!("Eliminando metadata de PDF: {}", path.display());

    let mut doc = Document::load(path)?;
    if doc.is_encrypted() {
        return Err(StripError::EncryptedPdf);
    }

    let cleared_keys = clear_info_dictionary(&mut doc)?;
    let removed_xmp = remove_catalog_metadata(&mut doc)?;
    if removed_xmp {
        let pruned = doc.prune_objects();
        debug!("{} objetos huérfanos podados", pruned.len());
    }

    let temp = TempSibling::for_target(path);
    {
        let file = File::create(temp.path()).map_err(|e| StripError::io(temp.path(), e))?;
        let mut writer = BufWriter::new(file);
        doc.save_to(&mut writer)
            .map_err(|e| StripError::io(temp.path(), io::Error::other(e)))?;
        writer.flush().map_err(|e| StripError::io(temp.path(), e))?;
    }

    let residual = verify_pdf_metadata_clean(temp.path())?;
    if !residual.is_empty() {
        return Err(StripError::Verification { residual });
    }

    temp.persist().map_err(|e| StripError::io(path, e))?;
    info!(
        "PDF limpio ({} claves Info, XMP {}): {}",
        cleared_keys,
        if removed_xmp { "eliminado" } else { "ausente" },
        path.display()
    );
    Ok(())
}

/// Comprueba que el diccionario Info está vacío y que el catálogo no tiene `/Metadata`.
pub fn verify_pdf_metadata_clean(path: &Path) -> Result<Vec<String>, StripError> {
    let doc = Document::load(path)?;
    let mut residual = Vec::new();

    if let Some(info) = info_dictionary(&doc) {
        for (key, _) in info.iter() {
            residual.push(format!("Info/{}", String::from_utf8_lossy(key)));
        }
    }

    if doc.catalog()?.has(b"Metadata") {
        residual.push("Catalog/Metadata".to_string());
    }

    Ok(residual)
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Elimina todas las claves del diccionario Info, que se conserva vacío.
fn clear_info_dictionary(doc: &mut Document) -> Result<usize, StripError> {
    let info_id: Option<ObjectId> = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Dictionary(_)) => None,
        _ => return Ok(0),
    };

    let info = match info_id {
        Some(id) => doc.get_object_mut(id).and_then(Object::as_dict_mut)?,
        None => doc.trailer.get_mut(b"Info").and_then(Object::as_dict_mut)?,
    };

    let keys: Vec<Vec<u8>> = info.iter().map(|(key, _)| key.clone()).collect();
    for key in &keys {
        info.remove(key);
    }
    Ok(keys.len())
}

fn remove_catalog_metadata(doc: &mut Document) -> Result<bool, StripError> {
    let root_id = doc.trailer.get(b"Root").and_then(Object::as_reference)?;
    let catalog = doc.get_object_mut(root_id).and_then(Object::as_dict_mut)?;
    Ok(catalog.remove(b"Metadata").is_some())
}
