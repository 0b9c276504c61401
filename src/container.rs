//! Reescritura en streaming de contenedores ZIP con sustitución de entradas.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::ContainerRewriteError;
use crate::strip::utils::TempSibling;

/// Reescribe el ZIP en `path` aplicando `transform` y lo reemplaza de forma atómica.
///
/// `transform` recibe el nombre y el contenido descomprimido de cada entrada.
/// Si devuelve `Some`, ese contenido sustituye al original; con `None` la
/// entrada se copia en crudo, sin recomprimir. Ante cualquier error el
/// temporal se descarta y `path` no se toca.
///
/// Devuelve el número de entradas sustituidas.
pub fn rewrite_zip<F, E>(path: &Path, transform: F) -> Result<usize, ContainerRewriteError>
where
    F: FnMut(&str, &[u8]) -> Result<Option<Vec<u8>>, E>,
    E: Display,
{
    let temp = TempSibling::for_target(path);
    let replaced = rewrite_zip_to(path, temp.path(), transform)?;

    temp.persist()
        .map_err(|source| ContainerRewriteError::Replace {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(replaced)
}

/// Copia cada entrada de `source_path` a un ZIP nuevo en `output_path`, en el mismo orden.
pub fn rewrite_zip_to<F, E>(
    source_path: &Path,
    output_path: &Path,
    mut transform: F,
) -> Result<usize, ContainerRewriteError>
where
    F: FnMut(&str, &[u8]) -> Result<Option<Vec<u8>>, E>,
    E: Display,
{
    let source = File::open(source_path).map_err(|source| ContainerRewriteError::Open {
        path: source_path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(source))?;

    let target = File::create(output_path)?;
    let mut writer = ZipWriter::new(BufWriter::new(target));

    let mut replaced = 0_usize;
    for index in 0..archive.len() {
        let pending = {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                None
            } else {
                let name = entry.name().to_string();
                let mut contents = Vec::with_capacity(entry.size().min(1 << 24) as usize);
                entry.read_to_end(&mut contents)?;

                match transform(&name, &contents) {
                    Ok(Some(replacement)) => {
                        let options = entry_options(
                            entry.compression(),
                            entry.unix_mode(),
                            entry.last_modified(),
                        );
                        Some((name, replacement, options))
                    }
                    Ok(None) => None,
                    Err(reason) => {
                        return Err(ContainerRewriteError::Transform {
                            entry: name,
                            reason: reason.to_string(),
                        });
                    }
                }
            }
        };

        match pending {
            Some((name, replacement, options)) => {
                debug!("Sustituyendo entrada '{}' ({} bytes)", name, replacement.len());
                writer.start_file(name, options)?;
                writer.write_all(&replacement)?;
                replaced += 1;
            }
            None => {
                let raw = archive.by_index_raw(index)?;
                writer.raw_copy_file(raw)?;
            }
        }
    }

    let mut output = writer.finish()?;
    output.flush()?;
    output.get_ref().sync_all()?;

    Ok(replaced)
}

fn entry_options(
    compression: CompressionMethod,
    unix_mode: Option<u32>,
    last_modified: Option<DateTime>,
) -> FileOptions<'static, ()> {
    let method = match compression {
        CompressionMethod::Stored => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    };

    let mut options = FileOptions::<'static, ()>::default().compression_method(method);
    if let Some(mode) = unix_mode {
        options = options.unix_permissions(mode);
    }
    if let Some(time) = last_modified {
        options = options.last_modified_time(time);
    }
    options
}
