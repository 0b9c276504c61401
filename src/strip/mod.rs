//! Estrategias de eliminación de metadata, una por familia de formatos.

mod audio;
mod constants;
mod image;
mod office;
mod pdf;
pub(crate) mod utils;

use std::path::Path;

use crate::error::StripError;
use crate::format::FormatTag;

pub use self::audio::{AudioFormat, remove_audio_metadata};
pub use self::constants::{
    APP_SANITIZE_FIELDS, CANONICAL_APP_VERSION, CANONICAL_TIMESTAMP, CORE_SANITIZE_FIELDS,
};
pub use self::image::{RasterFormat, remove_image_metadata, verify_image_metadata_clean};
pub use self::office::{OfficeFamily, remove_office_metadata, verify_office_metadata_clean};
pub use self::pdf::{remove_pdf_metadata, verify_pdf_metadata_clean};

/// Familia de formatos con una estrategia de limpieza propia.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatFamily {
    Office(OfficeFamily),
    Raster(RasterFormat),
    Audio(AudioFormat),
    Pdf,
}

impl FormatFamily {
    /// Devuelve `None` para `FormatTag::Unknown`.
    pub fn from_tag(tag: FormatTag) -> Option<Self> {
        let family = match tag {
            FormatTag::Docx => FormatFamily::Office(OfficeFamily::Word),
            FormatTag::Xlsx => FormatFamily::Office(OfficeFamily::Spreadsheet),
            FormatTag::Pptx => FormatFamily::Office(OfficeFamily::Presentation),
            FormatTag::Png => FormatFamily::Raster(RasterFormat::Png),
            FormatTag::Jpeg => FormatFamily::Raster(RasterFormat::Jpeg),
            FormatTag::Wav => FormatFamily::Audio(AudioFormat::Wav),
            FormatTag::Flac => FormatFamily::Audio(AudioFormat::Flac),
            FormatTag::Mp3 => FormatFamily::Audio(AudioFormat::Mp3),
            FormatTag::Pdf => FormatFamily::Pdf,
            FormatTag::Unknown => return None,
        };
        Some(family)
    }
}

/// Despacha la limpieza en sitio a la estrategia de la familia.
pub fn strip_metadata(path: &Path, family: FormatFamily) -> Result<(), StripError> {
    match family {
        FormatFamily::Office(office) => remove_office_metadata(path, office),
        FormatFamily::Raster(raster) => remove_image_metadata(path, raster),
        FormatFamily::Audio(audio) => remove_audio_metadata(path, audio),
        FormatFamily::Pdf => remove_pdf_metadata(path),
    }
}

#[cfg(test)]
mod tests;
