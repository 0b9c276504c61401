//! Limpieza de audio WAV, FLAC y MP3 reconstruyendo el contenedor sólo con el flujo de audio.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::StripError;
use crate::format::is_mpeg_frame_sync;
use crate::strip::utils::TempSibling;

/// Contenedores de audio soportados.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AudioFormat {
    Wav,
    Flac,
    Mp3,
}

impl AudioFormat {
    fn label(self) -> &'static str {
        match self {
            AudioFormat::Wav => "WAV",
            AudioFormat::Flac => "FLAC",
            AudioFormat::Mp3 => "MP3",
        }
    }
}

// fmt, fact y data son lo único que un lector necesita para reproducir el audio.
const WAV_KEPT_CHUNKS: [&[u8; 4]; 3] = [b"fmt ", b"fact", b"data"];

const FLAC_STREAMINFO: u8 = 0;
const FLAC_SEEKTABLE: u8 = 3;

const ID3V1_LEN: usize = 128;
const APE_FOOTER_LEN: usize = 32;
const ID3V2_HEADER_LEN: usize = 10;

/// Elimina etiquetas y bloques de metadata de un archivo de audio.
pub fn remove_audio_metadata(path: &Path, format: AudioFormat) -> Result<(), StripError> {
    debug!("Eliminando metadata de audio {}: {}", format.label(), path.display());

    let data = fs::read(path).map_err(|e| StripError::io(path, e))?;
    let cleaned = rebuild_audio(format, &data)?;

    // Una segunda pasada sobre el resultado no debe encontrar nada más que quitar.
    if rebuild_audio(format, &cleaned)? != cleaned {
        return Err(StripError::Verification {
            residual: vec![format!("{} tags", format.label())],
        });
    }

    let temp = TempSibling::for_target(path);
    fs::write(temp.path(), &cleaned).map_err(|e| StripError::io(temp.path(), e))?;
    temp.persist().map_err(|e| StripError::io(path, e))?;

    info!(
        "Audio {} reconstruido ({} -> {} bytes): {}",
        format.label(),
        data.len(),
        cleaned.len(),
        path.display()
    );
    Ok(())
}

pub(crate) fn rebuild_audio(format: AudioFormat, data: &[u8]) -> Result<Vec<u8>, StripError> {
    match format {
        AudioFormat::Wav => rebuild_wav(data),
        AudioFormat::Flac => rebuild_flac(data),
        AudioFormat::Mp3 => strip_mp3_tags(data),
    }
}

// === WAV ===

fn rebuild_wav(data: &[u8]) -> Result<Vec<u8>, StripError> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(StripError::audio("WAV", "cabecera RIFF/WAVE ausente"));
    }

    let mut body = Vec::with_capacity(data.len());
    body.extend_from_slice(b"WAVE");

    // Lo que sigue al cuerpo RIFF declarado no es parte del WAV.
    let declared_riff_end = 8_usize.saturating_add(read_u32_le(&data[4..8]) as usize);
    let riff_end = if declared_riff_end <= 12 {
        // Grabaciones en curso dejan el tamaño RIFF a cero.
        data.len()
    } else {
        declared_riff_end.min(data.len())
    };
    if riff_end < data.len() {
        debug!("Descartando {} bytes tras el cuerpo RIFF", data.len() - riff_end);
    }

    let mut has_fmt = false;
    let mut has_data = false;
    let mut offset = 12;
    while offset + 8 <= riff_end {
        let chunk_id = &data[offset..offset + 4];
        let size = read_u32_le(&data[offset + 4..offset + 8]) as usize;
        let start = offset + 8;
        let declared_end = start.saturating_add(size);

        let end = if declared_end <= riff_end {
            declared_end
        } else if chunk_id == b"data" {
            // Grabaciones interrumpidas dejan un tamaño mayor que el archivo.
            riff_end
        } else {
            return Err(StripError::audio(
                "WAV",
                format!("bloque '{}' truncado", String::from_utf8_lossy(chunk_id)),
            ));
        };

        if WAV_KEPT_CHUNKS.iter().any(|kept| kept.as_slice() == chunk_id) {
            has_fmt |= chunk_id == b"fmt ";
            has_data |= chunk_id == b"data";
            let payload = &data[start..end];
            body.extend_from_slice(chunk_id);
            body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            body.extend_from_slice(payload);
            if payload.len() % 2 == 1 {
                body.push(0);
            }
        } else {
            debug!("Descartando bloque WAV '{}'", String::from_utf8_lossy(chunk_id));
        }

        offset = end + size % 2;
    }

    if !has_fmt || !has_data {
        return Err(StripError::audio("WAV", "faltan los bloques 'fmt ' o 'data'"));
    }

    let riff_size = u32::try_from(body.len())
        .map_err(|_| StripError::audio("WAV", "el audio excede el límite de RIFF"))?;
    let mut output = Vec::with_capacity(body.len() + 8);
    output.extend_from_slice(b"RIFF");
    output.extend_from_slice(&riff_size.to_le_bytes());
    output.extend_from_slice(&body);
    Ok(output)
}

// === FLAC ===

fn rebuild_flac(data: &[u8]) -> Result<Vec<u8>, StripError> {
    if !data.starts_with(b"fLaC") {
        return Err(StripError::audio("FLAC", "firma fLaC ausente"));
    }

    let mut kept: Vec<(u8, &[u8])> = Vec::new();
    let mut offset = 4;
    loop {
        let header = data
            .get(offset..offset + 4)
            .ok_or_else(|| StripError::audio("FLAC", "cabecera de bloque truncada"))?;
        let is_last = header[0] & 0x80 != 0;
        let block_type = header[0] & 0x7F;
        let length =
            ((header[1] as usize) << 16) | ((header[2] as usize) << 8) | header[3] as usize;
        let payload = data
            .get(offset + 4..offset + 4 + length)
            .ok_or_else(|| StripError::audio("FLAC", "bloque de metadata truncado"))?;

        if kept.is_empty() && block_type != FLAC_STREAMINFO {
            return Err(StripError::audio("FLAC", "STREAMINFO debe ser el primer bloque"));
        }
        if block_type == FLAC_STREAMINFO || block_type == FLAC_SEEKTABLE {
            kept.push((block_type, payload));
        } else {
            debug!("Descartando bloque FLAC de tipo {}", block_type);
        }

        offset += 4 + length;
        if is_last {
            break;
        }
    }

    let frames = &data[offset..];
    let mut output = Vec::with_capacity(data.len());
    output.extend_from_slice(b"fLaC");
    let last_index = kept.len() - 1;
    for (index, (block_type, payload)) in kept.iter().enumerate() {
        let flag: u8 = if index == last_index { 0x80 } else { 0x00 };
        let length = payload.len() as u32;
        output.push(flag | *block_type);
        output.extend_from_slice(&length.to_be_bytes()[1..]);
        output.extend_from_slice(payload);
    }
    output.extend_from_slice(frames);
    Ok(output)
}

// === MP3 ===

fn strip_mp3_tags(data: &[u8]) -> Result<Vec<u8>, StripError> {
    let mut start = 0;
    while data[start..].starts_with(b"ID3") {
        let header = data
            .get(start..start + ID3V2_HEADER_LEN)
            .ok_or_else(|| StripError::audio("MP3", "cabecera ID3v2 truncada"))?;
        let has_footer = header[5] & 0x10 != 0;
        let size = synchsafe_to_u32(&header[6..10]) as usize;
        let tag_len = ID3V2_HEADER_LEN + size + if has_footer { ID3V2_HEADER_LEN } else { 0 };
        if start + tag_len > data.len() {
            return Err(StripError::audio("MP3", "etiqueta ID3v2 truncada"));
        }
        debug!("Descartando ID3v2.{} de {} bytes", header[3], tag_len);
        start += tag_len;
    }

    let mut end = data.len();
    loop {
        let available = end - start;
        if available >= ID3V1_LEN && data[end - ID3V1_LEN..].starts_with(b"TAG") {
            debug!("Descartando ID3v1");
            end -= ID3V1_LEN;
            continue;
        }
        if available >= APE_FOOTER_LEN
            && data[end - APE_FOOTER_LEN..].starts_with(b"APETAGEX")
        {
            let footer = &data[end - APE_FOOTER_LEN..end];
            let size = read_u32_le(&footer[12..16]) as usize;
            let flags = read_u32_le(&footer[20..24]);
            let has_header = flags & (1 << 31) != 0;
            // El tamaño declarado incluye el propio pie; uno menor no avanza.
            if size < APE_FOOTER_LEN {
                return Err(StripError::audio("MP3", "etiqueta APEv2 inválida"));
            }
            let tag_len = size + if has_header { APE_FOOTER_LEN } else { 0 };
            if tag_len > available {
                return Err(StripError::audio("MP3", "etiqueta APEv2 truncada"));
            }
            debug!("Descartando APEv2 de {} bytes", tag_len);
            end -= tag_len;
            continue;
        }
        if available >= ID3V2_HEADER_LEN
            && data[end - ID3V2_HEADER_LEN..].starts_with(b"3DI")
        {
            let footer = &data[end - ID3V2_HEADER_LEN..end];
            let tag_len = synchsafe_to_u32(&footer[6..10]) as usize + 2 * ID3V2_HEADER_LEN;
            if tag_len > available {
                return Err(StripError::audio("MP3", "etiqueta ID3v2 final truncada"));
            }
            debug!("Descartando ID3v2 final de {} bytes", tag_len);
            end -= tag_len;
            continue;
        }
        break;
    }

    let frames = &data[start..end];
    if !is_mpeg_frame_sync(frames) {
        return Err(StripError::audio("MP3", "no hay tramas MPEG tras las etiquetas"));
    }
    Ok(frames.to_vec())
}

fn synchsafe_to_u32(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0_u32, |acc, byte| (acc << 7) | (*byte as u32 & 0x7F))
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
