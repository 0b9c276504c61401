//! Clasificación de las partes de un paquete Office según la metadata que contienen.

/// Familia de documento Office basada en ZIP.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OfficeFamily {
    Word,
    Spreadsheet,
    Presentation,
}

/// Papel de una entrada del paquete en la limpieza.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PartRole {
    CoreProperties,
    ExtendedProperties,
    CustomProperties,
    /// Parte de comentarios o autores; se vacían los elementos a `list_depth`.
    Annotations { list_depth: usize },
    /// Parte de texto de Word que puede contener anclas de comentarios.
    WordStory,
    /// Notas del orador de una diapositiva.
    SpeakerNotes,
    /// Diapositiva que puede llevar tinta o referencias a comentarios.
    SlideStory,
    Passthrough,
}

pub(crate) const CORE_PART: &str = "docProps/core.xml";
pub(crate) const APP_PART: &str = "docProps/app.xml";
pub(crate) const CUSTOM_PART: &str = "docProps/custom.xml";

pub(crate) fn part_role(family: OfficeFamily, name: &str) -> PartRole {
    match name {
        CORE_PART => return PartRole::CoreProperties,
        APP_PART => return PartRole::ExtendedProperties,
        CUSTOM_PART => return PartRole::CustomProperties,
        _ => {}
    }

    if !name.ends_with(".xml") || name.contains("/_rels/") {
        return PartRole::Passthrough;
    }

    match family {
        OfficeFamily::Word => word_part_role(name),
        OfficeFamily::Spreadsheet => spreadsheet_part_role(name),
        OfficeFamily::Presentation => presentation_part_role(name),
    }
}

fn word_part_role(name: &str) -> PartRole {
    let Some(file_name) = name.strip_prefix("word/") else {
        return PartRole::Passthrough;
    };
    if file_name.contains('/') {
        return PartRole::Passthrough;
    }
    if file_name.starts_with("comments") || file_name == "people.xml" {
        return PartRole::Annotations { list_depth: 1 };
    }
    PartRole::WordStory
}

fn spreadsheet_part_role(name: &str) -> PartRole {
    if let Some(file_name) = name.strip_prefix("xl/")
        && file_name.starts_with("comments")
        && !file_name.contains('/')
    {
        // <comments> exige conservar <authors> y <commentList>.
        return PartRole::Annotations { list_depth: 2 };
    }
    if name.starts_with("xl/threadedComments/") || name.starts_with("xl/persons/") {
        return PartRole::Annotations { list_depth: 1 };
    }
    PartRole::Passthrough
}

fn presentation_part_role(name: &str) -> PartRole {
    if name.starts_with("ppt/comments/")
        || name == "ppt/commentAuthors.xml"
        || name == "ppt/authors.xml"
    {
        return PartRole::Annotations { list_depth: 1 };
    }
    if name.starts_with("ppt/notesSlides/") {
        return PartRole::SpeakerNotes;
    }
    if let Some(file_name) = name.strip_prefix("ppt/slides/")
        && !file_name.contains('/')
    {
        return PartRole::SlideStory;
    }
    PartRole::Passthrough
}
