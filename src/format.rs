//! Clasificación de archivos por contenido, independiente de la extensión.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use infer::Infer;
use log::debug;
use serde::{Deserialize, Serialize};
use zip::ZipArchive;

const HEADER_LEN: u64 = 12;

const PDF_SIGNATURE: &[u8] = b"%PDF";
const PNG_SIGNATURE: &[u8] = b"\x89PNG";
const JPEG_SOI: &[u8] = b"\xFF\xD8";
const FLAC_SIGNATURE: &[u8] = b"fLaC";
const RIFF_SIGNATURE: &[u8] = b"RIFF";
const WAVE_SIGNATURE: &[u8] = b"WAVE";
const ID3_SIGNATURE: &[u8] = b"ID3";
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";

/// Formatos que el motor reconoce. Se deriva sólo del contenido del archivo.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    Pdf,
    Png,
    Jpeg,
    Flac,
    Wav,
    Mp3,
    Docx,
    Xlsx,
    Pptx,
    Unknown,
}

impl FormatTag {
    pub fn is_supported(self) -> bool {
        self != FormatTag::Unknown
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatTag::Pdf => "PDF",
            FormatTag::Png => "PNG",
            FormatTag::Jpeg => "JPEG",
            FormatTag::Flac => "FLAC",
            FormatTag::Wav => "WAV",
            FormatTag::Mp3 => "MP3",
            FormatTag::Docx => "DOCX",
            FormatTag::Xlsx => "XLSX",
            FormatTag::Pptx => "PPTX",
            FormatTag::Unknown => "desconocido",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clasifica el archivo leyendo su cabecera y, si es un ZIP, su directorio central.
///
/// Nunca falla: cualquier error de lectura se reporta como `FormatTag::Unknown`.
pub fn classify(path: &Path) -> FormatTag {
    let header = match read_header(path) {
        Ok(header) => header,
        Err(err) => {
            debug!("No se pudo leer la cabecera de {}: {}", path.display(), err);
            return FormatTag::Unknown;
        }
    };

    match classify_header(&header) {
        Some(tag) => tag,
        None if header.starts_with(ZIP_SIGNATURE) => classify_office_package(path),
        None => FormatTag::Unknown,
    }
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN).read_to_end(&mut header)?;
    Ok(header)
}

/// Reglas de firma sobre los primeros bytes; la primera coincidencia gana.
fn classify_header(header: &[u8]) -> Option<FormatTag> {
    if header.starts_with(PDF_SIGNATURE) {
        return Some(FormatTag::Pdf);
    }
    if header.starts_with(PNG_SIGNATURE) {
        return Some(FormatTag::Png);
    }
    if header.starts_with(JPEG_SOI) {
        return Some(FormatTag::Jpeg);
    }
    if header.starts_with(FLAC_SIGNATURE) {
        return Some(FormatTag::Flac);
    }
    if header.starts_with(RIFF_SIGNATURE) && header.get(8..12) == Some(WAVE_SIGNATURE) {
        return Some(FormatTag::Wav);
    }
    if header.starts_with(ID3_SIGNATURE) || is_mpeg_frame_sync(header) {
        return Some(FormatTag::Mp3);
    }
    None
}

/// Sincronía de trama MPEG (11 bits a uno) con capa III.
pub(crate) fn is_mpeg_frame_sync(bytes: &[u8]) -> bool {
    match bytes {
        [0xFF, second, ..] => second & 0xE0 == 0xE0 && (second >> 1) & 0x03 == 0x01,
        _ => false,
    }
}

fn classify_office_package(path: &Path) -> FormatTag {
    let archive = match File::open(path).map(ZipArchive::new) {
        Ok(Ok(archive)) => archive,
        Ok(Err(err)) => {
            debug!("{} no se pudo abrir como ZIP: {}", path.display(), err);
            return FormatTag::Unknown;
        }
        Err(err) => {
            debug!("No se pudo reabrir {}: {}", path.display(), err);
            return FormatTag::Unknown;
        }
    };

    let names: Vec<&str> = archive.file_names().collect();
    classify_package_entries(&names)
}

fn classify_package_entries(names: &[&str]) -> FormatTag {
    if !names.contains(&CONTENT_TYPES_ENTRY) {
        return FormatTag::Unknown;
    }

    let has_prefix = |prefix: &str| names.iter().any(|name| name.starts_with(prefix));
    if has_prefix("word/") {
        FormatTag::Docx
    } else if has_prefix("xl/") {
        FormatTag::Xlsx
    } else if has_prefix("ppt/") {
        FormatTag::Pptx
    } else {
        FormatTag::Unknown
    }
}

/// Intenta detectar el tipo MIME del archivo para mensajes de diagnóstico.
///
/// Es sólo orientativo: la clasificación nunca depende de este valor.
pub(crate) fn mime_hint(path: &Path) -> Option<String> {
    Infer::new()
        .get_from_path(path)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type().to_string())
}
