//! Valores canónicos a los que se restablecen las propiedades de metadata.

pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const CP_NS: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const APP_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
pub const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const PRESENTATIONML_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const PRESENTATIONML_2010_NS: &str = "http://schemas.microsoft.com/office/powerpoint/2010/main";
pub const PRESENTATIONML_2018_NS: &str = "http://schemas.microsoft.com/office/powerpoint/2018/8/main";

/// Marca temporal canónica para fechas de creación, modificación e impresión.
pub const CANONICAL_TIMESTAMP: &str = "1900-01-01T00:00:00Z";

/// Versión de aplicación fija que se escribe en `app.xml`.
pub const CANONICAL_APP_VERSION: &str = "1.0";

pub const CORE_SANITIZE_FIELDS: [(&str, &str); 15] = [
    ("dc:creator", ""),
    ("cp:lastModifiedBy", ""),
    ("dc:title", ""),
    ("dc:subject", ""),
    ("dc:description", ""),
    ("cp:keywords", ""),
    ("cp:category", ""),
    ("cp:contentStatus", ""),
    ("dc:identifier", ""),
    ("dc:language", ""),
    ("cp:version", ""),
    ("dcterms:created", CANONICAL_TIMESTAMP),
    ("dcterms:modified", CANONICAL_TIMESTAMP),
    ("cp:lastPrinted", CANONICAL_TIMESTAMP),
    ("cp:revision", "1"),
];

pub const APP_SANITIZE_FIELDS: [(&str, &str); 4] = [
    ("Company", ""),
    ("Manager", ""),
    ("TotalTime", "0"),
    ("AppVersion", CANONICAL_APP_VERSION),
];

pub const CUSTOM_PROPERTIES_EMPTY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/custom-properties\" xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\"/>\n";

/// Marcadores de comentarios dentro de las partes de texto de un DOCX.
pub const WORD_COMMENT_ANCHORS: [&str; 3] =
    ["commentRangeStart", "commentRangeEnd", "commentReference"];

/// Formas de anotación de una diapositiva: tinta a mano alzada y referencias
/// a los comentarios modernos.
pub const SLIDE_ANNOTATION_SHAPES: [(&str, &str); 3] = [
    (PRESENTATIONML_NS, "contentPart"),
    (PRESENTATIONML_2010_NS, "contentPart"),
    (PRESENTATIONML_2018_NS, "commentRel"),
];
