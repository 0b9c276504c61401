//! Limpieza de imágenes PNG y JPEG mediante recodificación de los píxeles.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use log::{debug, info};

use crate::error::StripError;
use crate::strip::utils::TempSibling;

/// Formatos raster soportados.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            RasterFormat::Png => ImageFormat::Png,
            RasterFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Elimina la metadata de una imagen manteniendo la información visual.
///
/// La imagen se decodifica a un búfer de píxeles (modo, dimensiones y datos) y
/// se codifica de nuevo desde cero, por lo que EXIF, perfiles ICC y bloques de
/// texto no sobreviven.
pub fn remove_image_metadata(path: &Path, format: RasterFormat) -> Result<(), StripError> {
    debug!("Eliminando metadata de imagen {:?}: {}", format, path.display());

    let file = File::open(path).map_err(|e| StripError::io(path, e))?;
    let pixels = ImageReader::with_format(BufReader::new(file), format.image_format()).decode()?;

    let temp = TempSibling::for_target(path);
    pixels.save_with_format(temp.path(), format.image_format())?;

    let residual = verify_image_metadata_clean(temp.path(), format)?;
    if !residual.is_empty() {
        return Err(StripError::Verification { residual });
    }

    temp.persist().map_err(|e| StripError::io(path, e))?;
    info!(
        "Imagen {}x{} recodificada sin metadata: {}",
        pixels.width(),
        pixels.height(),
        path.display()
    );
    Ok(())
}

/// Comprueba que una imagen carece de EXIF y, si es PNG, de bloques de texto o ICC.
pub fn verify_image_metadata_clean(
    path: &Path,
    format: RasterFormat,
) -> Result<Vec<String>, StripError> {
    let mut residual = Vec::new();

    let file = File::open(path).map_err(|e| StripError::io(path, e))?;
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => {
            if exif.fields().next().is_some() {
                residual.push("EXIF".to_string());
            }
        }
        Err(exif::Error::NotFound(_))
        | Err(exif::Error::BlankValue(_))
        | Err(exif::Error::InvalidFormat(_)) => {}
        Err(exif::Error::Io(err)) => return Err(StripError::io(path, err)),
        Err(other) => residual.push(format!("EXIF ilegible ({other})")),
    }

    if format == RasterFormat::Png {
        let file = File::open(path).map_err(|e| StripError::io(path, e))?;
        let reader = match png::Decoder::new(BufReader::new(file)).read_info() {
            Ok(reader) => reader,
            Err(err) => {
                residual.push(format!("PNG ilegible ({err})"));
                return Ok(residual);
            }
        };
        let info = reader.info();
        if !info.uncompressed_latin1_text.is_empty()
            || !info.compressed_latin1_text.is_empty()
            || !info.utf8_text.is_empty()
        {
            residual.push("PNG text".to_string());
        }
        if info.icc_profile.is_some() {
            residual.push("PNG iCCP".to_string());
        }
    }

    Ok(residual)
}
