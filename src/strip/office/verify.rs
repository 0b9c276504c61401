use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use xmltree::Element;
use zip::ZipArchive;

use crate::error::{ContainerRewriteError, StripError};
use crate::strip::constants::{
    APP_SANITIZE_FIELDS, CORE_SANITIZE_FIELDS, CUSTOM_PROPERTIES_EMPTY, DRAWINGML_NS,
    WORD_COMMENT_ANCHORS, WORDML_NS,
};

use super::parts::{OfficeFamily, PartRole, part_role};
use super::sanitize::{has_slide_annotation_marker, is_slide_annotation};
use super::xml::{
    FieldSpec, app_field_spec, child_elements, core_field_spec, count_descendants,
    element_text_content, field_text, parse_tree,
};

/// Comprueba que un documento Office limpio no conserva metadata sensible.
///
/// Devuelve la lista de campos o partes que siguen conteniendo información;
/// vacía si el documento está limpio.
pub fn verify_office_metadata_clean(
    path: &Path,
    family: OfficeFamily,
) -> Result<Vec<String>, StripError> {
    let file = File::open(path).map_err(|e| StripError::io(path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(ContainerRewriteError::from)?;

    let mut residual = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(ContainerRewriteError::from)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let role = part_role(family, &name);
        if role == PartRole::Passthrough {
            continue;
        }

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(ContainerRewriteError::from)?;
        inspect_part(role, &name, &contents, &mut residual)?;
    }

    Ok(residual)
}

fn inspect_part(
    role: PartRole,
    name: &str,
    contents: &[u8],
    residual: &mut Vec<String>,
) -> Result<(), StripError> {
    match role {
        PartRole::CoreProperties => {
            let root = parse_tree(name, contents)?;
            collect_dirty_fields(&root, &CORE_SANITIZE_FIELDS, core_field_spec, residual);
        }
        PartRole::ExtendedProperties => {
            let root = parse_tree(name, contents)?;
            collect_dirty_fields(&root, &APP_SANITIZE_FIELDS, app_field_spec, residual);
        }
        PartRole::CustomProperties => {
            if contents != CUSTOM_PROPERTIES_EMPTY.as_bytes() {
                let root = parse_tree(name, contents)?;
                if child_elements(&root).next().is_some() {
                    residual.push(name.to_string());
                }
            }
        }
        PartRole::Annotations { list_depth } => {
            let root = parse_tree(name, contents)?;
            if elements_at_depth(&root, list_depth) > 0 {
                residual.push(name.to_string());
            }
        }
        PartRole::WordStory => {
            if contains_anchor_marker(contents) {
                let root = parse_tree(name, contents)?;
                let anchors = count_descendants(&root, &|element: &Element| {
                    element.namespace.as_deref() == Some(WORDML_NS)
                        && WORD_COMMENT_ANCHORS.contains(&element.name.as_str())
                });
                if anchors > 0 {
                    residual.push(format!("{name} (anclas de comentarios)"));
                }
            }
        }
        PartRole::SpeakerNotes => {
            let root = parse_tree(name, contents)?;
            let texts = count_descendants(&root, &|element: &Element| {
                element.name == "t"
                    && element.namespace.as_deref() == Some(DRAWINGML_NS)
                    && !element_text_content(element).is_empty()
            });
            if texts > 0 {
                residual.push(name.to_string());
            }
        }
        PartRole::SlideStory => {
            if has_slide_annotation_marker(contents) {
                let root = parse_tree(name, contents)?;
                let shapes = count_descendants(&root, &|element: &Element| {
                    is_slide_annotation(element.namespace.as_deref(), &element.name)
                });
                if shapes > 0 {
                    residual.push(format!("{name} (anotaciones de diapositiva)"));
                }
            }
        }
        PartRole::Passthrough => {}
    }
    Ok(())
}

/// Un campo ausente cuenta como limpio.
fn collect_dirty_fields(
    root: &Element,
    expected_values: &[(&'static str, &'static str)],
    lookup: fn(&'static str) -> Option<FieldSpec<'static>>,
    residual: &mut Vec<String>,
) {
    for &(tag, expected) in expected_values {
        if let Some(spec) = lookup(tag)
            && let Some(actual) = field_text(root, spec)
            && actual != expected
        {
            residual.push(tag.to_string());
        }
    }
}

fn elements_at_depth(root: &Element, depth: usize) -> usize {
    if depth <= 1 {
        return child_elements(root).count();
    }
    child_elements(root)
        .map(|child| elements_at_depth(child, depth - 1))
        .sum()
}

fn contains_anchor_marker(contents: &[u8]) -> bool {
    contents
        .windows(b"comment".len())
        .any(|window| window == b"comment")
}
