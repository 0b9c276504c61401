use super::{
    AudioFormat, CANONICAL_APP_VERSION, CANONICAL_TIMESTAMP, FormatFamily, OfficeFamily,
    RasterFormat, strip_metadata, verify_image_metadata_clean, verify_office_metadata_clean,
    verify_pdf_metadata_clean,
};
use crate::error::StripError;
use crate::format::{FormatTag, classify};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>Plan secreto</dc:title><dc:creator>Alice</dc:creator><cp:lastModifiedBy>Bob</cp:lastModifiedBy><cp:revision>7</cp:revision><dcterms:created xsi:type="dcterms:W3CDTF">2023-05-04T10:00:00Z</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">2024-01-02T09:30:00Z</dcterms:modified></cp:coreProperties>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>Microsoft Office Word</Application><TotalTime>42</TotalTime><Company>Acme</Company><AppVersion>16.0000</AppVersion></Properties>"#;

const CUSTOM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/custom-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Cliente"><vt:lpwstr>Acme</vt:lpwstr></property></Properties>"#;

const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:commentRangeStart w:id="0"/><w:r><w:t>Hola mundo</w:t></w:r><w:commentRangeEnd w:id="0"/><w:r><w:commentReference w:id="0"/></w:r></w:p></w:body></w:document>"#;

const WORD_COMMENTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:comments xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:comment w:id="0" w:author="Alice" w:initials="A"><w:p><w:r><w:t>Revisar cifras</w:t></w:r></w:p></w:comment></w:comments>"#;

const SHEET_COMMENTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<comments xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><authors><author>Alice</author></authors><commentList><comment ref="A1" authorId="0"><text><t>Cifra provisional</t></text></comment></commentList></comments>"#;

const NOTES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>Nota privada</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:notes>"#;

#[test]
fn from_tag_maps_every_supported_format() {
    assert_eq!(
        FormatFamily::from_tag(FormatTag::Docx),
        Some(FormatFamily::Office(OfficeFamily::Word))
    );
    assert_eq!(
        FormatFamily::from_tag(FormatTag::Xlsx),
        Some(FormatFamily::Office(OfficeFamily::Spreadsheet))
    );
    assert_eq!(
        FormatFamily::from_tag(FormatTag::Pptx),
        Some(FormatFamily::Office(OfficeFamily::Presentation))
    );
    assert_eq!(
        FormatFamily::from_tag(FormatTag::Jpeg),
        Some(FormatFamily::Raster(RasterFormat::Jpeg))
    );
    assert_eq!(
        FormatFamily::from_tag(FormatTag::Flac),
        Some(FormatFamily::Audio(AudioFormat::Flac))
    );
    assert_eq!(FormatFamily::from_tag(FormatTag::Pdf), Some(FormatFamily::Pdf));
    assert_eq!(FormatFamily::from_tag(FormatTag::Unknown), None);
}

#[test]
fn docx_properties_comments_and_anchors_are_removed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("informe.docx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("docProps/core.xml", CORE_XML),
            ("docProps/app.xml", APP_XML),
            ("docProps/custom.xml", CUSTOM_XML),
            ("word/document.xml", DOCUMENT_XML),
            ("word/comments.xml", WORD_COMMENTS_XML),
        ],
    )?;
    assert_eq!(classify(&source), FormatTag::Docx);
    assert!(!verify_office_metadata_clean(&source, OfficeFamily::Word)?.is_empty());

    strip_metadata(&source, FormatFamily::Office(OfficeFamily::Word))?;

    assert!(verify_office_metadata_clean(&source, OfficeFamily::Word)?.is_empty());

    let core = read_entry(&source, "docProps/core.xml")?;
    assert!(!core.contains("Alice"));
    assert!(!core.contains("Bob"));
    assert!(!core.contains("Plan secreto"));
    assert!(core.contains("dc:creator"));
    assert!(core.contains(CANONICAL_TIMESTAMP));
    assert!(core.contains("xsi:type=\"dcterms:W3CDTF\""));
    assert!(!core.contains("2023-05-04"));

    let app = read_entry(&source, "docProps/app.xml")?;
    assert!(!app.contains("Acme"));
    assert!(app.contains(&format!("<AppVersion>{CANONICAL_APP_VERSION}</AppVersion>")));
    assert!(app.contains("<TotalTime>0</TotalTime>"));
    assert!(app.contains("Microsoft Office Word"));

    let custom = read_entry(&source, "docProps/custom.xml")?;
    assert!(!custom.contains("Cliente"));

    let comments = read_entry(&source, "word/comments.xml")?;
    assert!(!comments.contains("Alice"));
    assert!(!comments.contains("Revisar cifras"));
    assert!(comments.contains("w:comments"));

    let document = read_entry(&source, "word/document.xml")?;
    assert!(document.contains("Hola mundo"));
    assert!(!document.contains("commentRangeStart"));
    assert!(!document.contains("commentRangeEnd"));
    assert!(!document.contains("commentReference"));

    assert_eq!(classify(&source), FormatTag::Docx);
    Ok(())
}

#[test]
fn xlsx_comment_lists_are_emptied() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("cuentas.xlsx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("docProps/core.xml", CORE_XML),
            ("xl/workbook.xml", "<workbook/>"),
            ("xl/comments1.xml", SHEET_COMMENTS_XML),
        ],
    )?;
    assert_eq!(classify(&source), FormatTag::Xlsx);

    strip_metadata(&source, FormatFamily::Office(OfficeFamily::Spreadsheet))?;

    let comments = read_entry(&source, "xl/comments1.xml")?;
    assert!(!comments.contains("Alice"));
    assert!(!comments.contains("Cifra provisional"));
    assert!(comments.contains("authors"));
    assert!(comments.contains("commentList"));
    assert_eq!(read_entry(&source, "xl/workbook.xml")?, "<workbook/>");
    Ok(())
}

#[test]
fn pptx_speaker_notes_are_cleared() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("charla.pptx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("docProps/app.xml", APP_XML),
            ("ppt/presentation.xml", "<presentation/>"),
            ("ppt/notesSlides/notesSlide1.xml", NOTES_XML),
        ],
    )?;
    assert_eq!(classify(&source), FormatTag::Pptx);

    strip_metadata(&source, FormatFamily::Office(OfficeFamily::Presentation))?;

    let notes = read_entry(&source, "ppt/notesSlides/notesSlide1.xml")?;
    assert!(!notes.contains("Nota privada"));
    assert!(notes.contains("a:t"));
    assert!(verify_office_metadata_clean(&source, OfficeFamily::Presentation)?.is_empty());
    Ok(())
}

#[test]
fn pptx_comments_and_slide_annotations_are_removed() -> Result<(), Box<dyn std::error::Error>> {
    const COMMENTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:cmLst xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cm authorId="0" dt="2024-01-01T10:00:00.000" idx="1"><p:pos x="10" y="10"/><p:text>Cambiar el color</p:text></p:cm></p:cmLst>"#;
    const AUTHORS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:cmAuthorLst xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cmAuthor id="0" name="Alice" initials="A" lastIdx="1" clrIdx="0"/></p:cmAuthorLst>"#;
    const SLIDE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p188="http://schemas.microsoft.com/office/powerpoint/2018/8/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>Resultados</a:t></a:r></a:p></p:txBody></p:sp><p:contentPart r:id="rId3"/></p:spTree></p:cSld><p:extLst><p:ext uri="{6950BFC3-D8DA-4A85-94F7-54DA5524770B}"><p188:commentRel r:id="rId4"/></p:ext></p:extLst></p:sld>"#;

    let dir = tempdir()?;
    let source = dir.path().join("revision.pptx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("docProps/core.xml", CORE_XML),
            ("ppt/presentation.xml", "<presentation/>"),
            ("ppt/slides/slide1.xml", SLIDE_XML),
            ("ppt/comments/comment1.xml", COMMENTS_XML),
            ("ppt/commentAuthors.xml", AUTHORS_XML),
        ],
    )?;
    assert_eq!(classify(&source), FormatTag::Pptx);
    let residual = verify_office_metadata_clean(&source, OfficeFamily::Presentation)?;
    assert!(residual.iter().any(|part| part.starts_with("ppt/slides/slide1.xml")));
    assert!(residual.contains(&"ppt/commentAuthors.xml".to_string()));

    strip_metadata(&source, FormatFamily::Office(OfficeFamily::Presentation))?;

    assert!(verify_office_metadata_clean(&source, OfficeFamily::Presentation)?.is_empty());
    let comments = read_entry(&source, "ppt/comments/comment1.xml")?;
    assert!(!comments.contains("Cambiar el color"));
    assert!(comments.contains("cmLst"));
    let authors = read_entry(&source, "ppt/commentAuthors.xml")?;
    assert!(!authors.contains("Alice"));
    let slide = read_entry(&source, "ppt/slides/slide1.xml")?;
    assert!(slide.contains("Resultados"));
    assert!(!slide.contains("contentPart"));
    assert!(!slide.contains("commentRel"));
    Ok(())
}

#[test]
fn flac_vorbis_comments_are_dropped_through_dispatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("cancion.flac");
    fs::write(&source, sample_flac())?;
    assert_eq!(classify(&source), FormatTag::Flac);

    strip_metadata(&source, FormatFamily::Audio(AudioFormat::Flac))?;

    let cleaned = fs::read(&source)?;
    assert!(!contains(&cleaned, b"Alice"));
    assert!(cleaned.ends_with(&FLAC_FRAMES));
    // STREAMINFO pasa a ser el último bloque de metadata.
    assert_eq!(cleaned[4], 0x80);
    assert_eq!(cleaned.len(), 4 + 4 + 34 + FLAC_FRAMES.len());
    assert_eq!(classify(&source), FormatTag::Flac);
    Ok(())
}

#[test]
fn mp3_id3_tags_are_dropped_through_dispatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("podcast.mp3");
    fs::write(&source, sample_mp3())?;
    assert_eq!(classify(&source), FormatTag::Mp3);

    strip_metadata(&source, FormatFamily::Audio(AudioFormat::Mp3))?;

    assert_eq!(fs::read(&source)?, MP3_FRAMES.to_vec());
    assert_eq!(classify(&source), FormatTag::Mp3);
    Ok(())
}

#[test]
fn malformed_office_part_fails_without_touching_the_file() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    let source = dir.path().join("roto.docx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("docProps/core.xml", "<cp:coreProperties><dc:creator>Alice"),
            ("word/document.xml", DOCUMENT_XML),
        ],
    )?;
    let before = fs::read(&source)?;

    let result = strip_metadata(&source, FormatFamily::Office(OfficeFamily::Word));

    assert!(result.is_err());
    assert_eq!(fs::read(&source)?, before);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn png_text_chunks_are_dropped_and_pixels_kept() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("foto.png");
    let pixels: Vec<u8> = (0..10 * 10 * 4).map(|i| (i * 7 % 251) as u8).collect();
    {
        let writer = BufWriter::new(File::create(&source)?);
        let mut encoder = png::Encoder::new(writer, 10, 10);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.add_text_chunk("Author".to_string(), "Alice".to_string())?;
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    let before = ::image::open(&source)?.to_rgba8();
    assert!(!verify_image_metadata_clean(&source, RasterFormat::Png)?.is_empty());

    strip_metadata(&source, FormatFamily::Raster(RasterFormat::Png))?;

    assert!(verify_image_metadata_clean(&source, RasterFormat::Png)?.is_empty());
    let bytes = fs::read(&source)?;
    assert!(!contains(&bytes, b"Alice"));
    assert!(!contains(&bytes, b"tEXt"));
    let after = ::image::open(&source)?.to_rgba8();
    assert_eq!(before.dimensions(), after.dimensions());
    assert_eq!(before.as_raw(), after.as_raw());
    assert_eq!(classify(&source), FormatTag::Png);
    Ok(())
}

#[test]
fn jpeg_exif_segment_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("foto.jpg");
    let mut encoded = Vec::new();
    ::image::RgbImage::from_pixel(8, 8, ::image::Rgb([200, 40, 40])).write_to(
        &mut std::io::Cursor::new(&mut encoded),
        ::image::ImageFormat::Jpeg,
    )?;
    fs::write(&source, with_exif_segment(&encoded))?;
    assert!(!verify_image_metadata_clean(&source, RasterFormat::Jpeg)?.is_empty());

    strip_metadata(&source, FormatFamily::Raster(RasterFormat::Jpeg))?;

    assert!(verify_image_metadata_clean(&source, RasterFormat::Jpeg)?.is_empty());
    assert!(!contains(&fs::read(&source)?, b"Exif\0\0"));
    assert_eq!(classify(&source), FormatTag::Jpeg);
    Ok(())
}

#[test]
fn pdf_info_and_xmp_are_removed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("contrato.pdf");
    write_sample_pdf(&source)?;
    assert_eq!(classify(&source), FormatTag::Pdf);
    assert!(contains(&fs::read(&source)?, b"Alice"));

    strip_metadata(&source, FormatFamily::Pdf)?;

    assert!(verify_pdf_metadata_clean(&source)?.is_empty());
    assert!(!contains(&fs::read(&source)?, b"Alice"));

    let doc = Document::load(&source)?;
    assert_eq!(doc.get_pages().len(), 1);
    assert!(!doc.catalog()?.has(b"Metadata"));
    Ok(())
}

#[test]
fn wav_info_list_is_dropped_through_dispatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("voz.wav");
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&8000u32.to_le_bytes());
    fmt.extend_from_slice(&16000u32.to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());

    let mut body = b"WAVE".to_vec();
    body.extend(riff_chunk(b"fmt ", &fmt));
    body.extend(riff_chunk(b"LIST", b"INFOIART\x06\x00\x00\x00Alice\0"));
    body.extend(riff_chunk(b"data", &[0, 1, 2, 3]));
    let mut wav = b"RIFF".to_vec();
    wav.extend_from_slice(&(body.len() as u32).to_le_bytes());
    wav.extend(body);
    fs::write(&source, &wav)?;

    strip_metadata(&source, FormatFamily::Audio(AudioFormat::Wav))?;

    let cleaned = fs::read(&source)?;
    assert!(!contains(&cleaned, b"Alice"));
    assert!(!contains(&cleaned, b"LIST"));
    assert!(contains(&cleaned, &[0, 1, 2, 3]));
    assert_eq!(classify(&source), FormatTag::Wav);
    Ok(())
}

#[test]
fn unparseable_pdf_is_reported_as_pdf_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("falso.pdf");
    fs::write(&source, b"%PDF-1.4\nbasura sin estructura")?;

    let err = strip_metadata(&source, FormatFamily::Pdf).expect_err("PDF ilegible");
    assert!(matches!(err, StripError::Pdf(_)));
    assert_eq!(fs::read(&source)?, b"%PDF-1.4\nbasura sin estructura");
    Ok(())
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) -> Result<(), Box<dyn std::error::Error>> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

fn read_entry(path: &Path, name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut contents = String::new();
    archive.by_name(name)?.read_to_string(&mut contents)?;
    Ok(contents)
}

fn write_sample_pdf(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 200.into(), 200.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let xmp_id = doc.add_object(Stream::new(
        dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
        b"<x:xmpmeta><dc:creator>Alice</dc:creator></x:xmpmeta>".to_vec(),
    ));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "Metadata" => xmp_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Author" => Object::string_literal("Alice"),
        "Producer" => Object::string_literal("Editor 3.1"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.save(path)?;
    Ok(())
}

// Inserta un APP1 con un IFD mínimo (Orientation = 1) justo después del SOI.
fn with_exif_segment(jpeg: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(b"II\x2a\x00\x08\x00\x00\x00");
    payload.extend_from_slice(&1u16.to_le_bytes());
    payload.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
    payload.extend_from_slice(&0u32.to_le_bytes());

    let mut output = jpeg[..2].to_vec();
    output.extend_from_slice(&[0xFF, 0xE1]);
    output.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    output.extend(payload);
    output.extend_from_slice(&jpeg[2..]);
    output
}

const FLAC_FRAMES: [u8; 6] = [0xFF, 0xF8, 0x69, 0x08, 0x00, 0x10];

const MP3_FRAMES: [u8; 12] = [0xFF, 0xFB, 0x90, 0x64, 0, 0, 0, 0, 0xFF, 0xFB, 0x90, 0x64];

fn sample_flac() -> Vec<u8> {
    let comment = b"\x05\0\0\0vendor\x01\0\0\0\x0c\0\0\0ARTIST=Alice";
    let mut flac = b"fLaC".to_vec();
    flac.push(0x00);
    flac.extend_from_slice(&34_u32.to_be_bytes()[1..]);
    flac.extend_from_slice(&[0x10; 34]);
    flac.push(0x80 | 4);
    flac.extend_from_slice(&(comment.len() as u32).to_be_bytes()[1..]);
    flac.extend_from_slice(comment);
    flac.extend_from_slice(&FLAC_FRAMES);
    flac
}

fn sample_mp3() -> Vec<u8> {
    let frame = b"TPE1\0\0\0\x06\0\0\0Alice";
    let mut mp3 = b"ID3\x04\x00\x00".to_vec();
    mp3.extend_from_slice(&[0, 0, 0, frame.len() as u8]);
    mp3.extend_from_slice(frame);
    mp3.extend_from_slice(&MP3_FRAMES);
    let mut v1 = b"TAG".to_vec();
    v1.extend_from_slice(b"Entrevista");
    v1.resize(128, 0);
    mp3.extend(v1);
    mp3
}

fn riff_chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut chunk = id.to_vec();
    chunk.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    chunk.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        chunk.push(0);
    }
    chunk
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
