use crate::error::StripError;
use crate::strip::constants::{
    APP_SANITIZE_FIELDS, CUSTOM_PROPERTIES_EMPTY, CORE_SANITIZE_FIELDS, DRAWINGML_NS,
    SLIDE_ANNOTATION_SHAPES, WORD_COMMENT_ANCHORS, WORDML_NS,
};

use super::parts::{APP_PART, CORE_PART, PartRole};
use super::xml::{ElementAction, FieldSpec, app_field_spec, core_field_spec, rewrite_elements};

/// Aplica la limpieza que corresponde al papel de la parte; `None` si no cambia nada.
pub(crate) fn sanitize_part(
    role: PartRole,
    name: &str,
    contents: &[u8],
) -> Result<Option<Vec<u8>>, StripError> {
    match role {
        PartRole::CoreProperties => sanitize_core_properties(contents),
        PartRole::ExtendedProperties => sanitize_app_properties(contents),
        PartRole::CustomProperties => Ok(sanitize_custom_properties(contents)),
        PartRole::Annotations { list_depth } => empty_annotation_part(name, contents, list_depth),
        PartRole::WordStory => strip_comment_anchors(name, contents),
        PartRole::SpeakerNotes => clear_notes_text(name, contents),
        PartRole::SlideStory => strip_slide_annotations(name, contents),
        PartRole::Passthrough => Ok(None),
    }
}

/// Restablece los campos principales de `core.xml` para eliminar rastros de autoría.
pub(crate) fn sanitize_core_properties(contents: &[u8]) -> Result<Option<Vec<u8>>, StripError> {
    reset_root_fields(CORE_PART, contents, &CORE_SANITIZE_FIELDS, core_field_spec)
}

/// Restablece `Company`, `Manager`, `TotalTime` y `AppVersion` en `app.xml`.
pub(crate) fn sanitize_app_properties(contents: &[u8]) -> Result<Option<Vec<u8>>, StripError> {
    reset_root_fields(APP_PART, contents, &APP_SANITIZE_FIELDS, app_field_spec)
}

/// Reemplaza el XML de propiedades personalizadas por una plantilla vacía.
pub(crate) fn sanitize_custom_properties(contents: &[u8]) -> Option<Vec<u8>> {
    let sanitized = CUSTOM_PROPERTIES_EMPTY.as_bytes();
    (contents != sanitized).then(|| sanitized.to_vec())
}

/// Sólo se tocan los campos presentes: uno ausente ya no filtra nada.
fn reset_root_fields(
    part: &str,
    contents: &[u8],
    fields: &[(&'static str, &'static str)],
    lookup: fn(&'static str) -> Option<FieldSpec<'static>>,
) -> Result<Option<Vec<u8>>, StripError> {
    let specs: Vec<(FieldSpec<'static>, &'static str)> = fields
        .iter()
        .filter_map(|&(tag, value)| lookup(tag).map(|spec| (spec, value)))
        .collect();

    rewrite_elements(part, contents, |depth, name| {
        if depth != 1 {
            return ElementAction::Keep;
        }
        specs
            .iter()
            .find(|(spec, _)| spec.matches_name(name))
            .map_or(ElementAction::Keep, |&(_, value)| ElementAction::ReplaceText(value))
    })
}

/// Vacía una parte de comentarios o autores conservando la estructura exigida.
pub(crate) fn empty_annotation_part(
    part: &str,
    contents: &[u8],
    list_depth: usize,
) -> Result<Option<Vec<u8>>, StripError> {
    rewrite_elements(part, contents, |depth, _| {
        if depth == list_depth {
            ElementAction::Remove
        } else {
            ElementAction::Keep
        }
    })
}

/// Elimina `commentRangeStart`, `commentRangeEnd` y `commentReference` de una parte de Word.
pub(crate) fn strip_comment_anchors(
    part: &str,
    contents: &[u8],
) -> Result<Option<Vec<u8>>, StripError> {
    if !contains_bytes(contents, b"comment") {
        return Ok(None);
    }
    rewrite_elements(part, contents, |_, name| {
        let is_anchor = name.namespace.as_deref() == Some(WORDML_NS)
            && WORD_COMMENT_ANCHORS.contains(&name.local_name.as_str());
        if is_anchor {
            ElementAction::Remove
        } else {
            ElementAction::Keep
        }
    })
}

/// Borra todo el texto (`a:t`) de una diapositiva de notas.
pub(crate) fn clear_notes_text(part: &str, contents: &[u8]) -> Result<Option<Vec<u8>>, StripError> {
    rewrite_elements(part, contents, |_, name| {
        if name.local_name == "t" && name.namespace.as_deref() == Some(DRAWINGML_NS) {
            ElementAction::ReplaceText("")
        } else {
            ElementAction::Keep
        }
    })
}

/// Quita de una diapositiva la tinta (`contentPart`) y las referencias `commentRel`.
pub(crate) fn strip_slide_annotations(
    part: &str,
    contents: &[u8],
) -> Result<Option<Vec<u8>>, StripError> {
    if !has_slide_annotation_marker(contents) {
        return Ok(None);
    }
    rewrite_elements(part, contents, |_, name| {
        if is_slide_annotation(name.namespace.as_deref(), &name.local_name) {
            ElementAction::Remove
        } else {
            ElementAction::Keep
        }
    })
}

pub(crate) fn is_slide_annotation(namespace: Option<&str>, local_name: &str) -> bool {
    SLIDE_ANNOTATION_SHAPES
        .iter()
        .any(|&(ns, local)| namespace == Some(ns) && local_name == local)
}

pub(crate) fn has_slide_annotation_marker(contents: &[u8]) -> bool {
    contains_bytes(contents, b"contentPart") || contains_bytes(contents, b"commentRel")
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
