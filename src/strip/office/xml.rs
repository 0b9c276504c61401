use xml::name::OwnedName;
use xml::reader::{ParserConfig, XmlEvent as ReaderEvent};
use xml::writer::{EmitterConfig, XmlEvent as WriterEvent};
use xmltree::{Element, XMLNode};

use crate::error::StripError;
use crate::strip::constants::{APP_NS, CP_NS, DC_NS, DCTERMS_NS};

/// Describe la información necesaria para localizar un nodo en el XML de propiedades.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldSpec<'a> {
    pub(crate) local_name: &'a str,
    pub(crate) namespace: &'a str,
}

impl FieldSpec<'_> {
    pub(crate) fn matches_name(&self, name: &OwnedName) -> bool {
        name.local_name == self.local_name && name.namespace.as_deref() == Some(self.namespace)
    }

    pub(crate) fn matches_element(&self, element: &Element) -> bool {
        element.name == self.local_name && element.namespace.as_deref() == Some(self.namespace)
    }
}

/// Obtiene el campo de `core.xml` a partir de su etiqueta con prefijo (`dc:creator`).
pub(crate) fn core_field_spec(tag: &str) -> Option<FieldSpec<'_>> {
    let (prefix, local_name) = tag.split_once(':')?;
    let namespace = match prefix {
        "dc" => DC_NS,
        "cp" => CP_NS,
        "dcterms" => DCTERMS_NS,
        _ => return None,
    };
    Some(FieldSpec {
        local_name,
        namespace,
    })
}

/// Obtiene el campo de `app.xml`; sus elementos no llevan prefijo.
pub(crate) fn app_field_spec(tag: &str) -> Option<FieldSpec<'_>> {
    if tag.is_empty() || tag.contains(':') {
        return None;
    }
    Some(FieldSpec {
        local_name: tag,
        namespace: APP_NS,
    })
}

/// Decisión tomada para cada elemento durante una reescritura en streaming.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ElementAction<'v> {
    Keep,
    /// Descarta el elemento junto con todo su contenido.
    Remove,
    /// Conserva el elemento pero sustituye su contenido por este texto.
    ReplaceText(&'v str),
}

struct Skipped<'v> {
    depth: usize,
    replacement: Option<&'v str>,
    original_text: String,
    had_children: bool,
}

/// Reescribe un XML evento a evento preguntando a `decide` qué hacer con cada elemento.
///
/// `decide` recibe la profundidad del elemento (la raíz es 0) y su nombre
/// resuelto. Los atributos, prefijos y declaraciones de espacios de nombres del
/// resto del documento se conservan. Devuelve `None` si nada cambió.
pub(crate) fn rewrite_elements<'v, F>(
    part: &str,
    contents: &[u8],
    mut decide: F,
) -> Result<Option<Vec<u8>>, StripError>
where
    F: FnMut(usize, &OwnedName) -> ElementAction<'v>,
{
    let reader = ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(false)
        .cdata_to_characters(false)
        .ignore_comments(false)
        .create_reader(contents);

    let mut output = Vec::with_capacity(contents.len());
    let mut writer = EmitterConfig::new()
        .perform_indent(false)
        .create_writer(&mut output);

    let mut depth = 0_usize;
    let mut skipped: Option<Skipped<'v>> = None;
    let mut modified = false;

    for event in reader {
        let event = event.map_err(|e| StripError::xml(part, e))?;

        if let Some(active) = skipped.as_mut() {
            match &event {
                ReaderEvent::StartElement { .. } => {
                    active.had_children = true;
                    depth += 1;
                }
                ReaderEvent::EndElement { .. } => {
                    depth -= 1;
                    if depth == active.depth {
                        match active.replacement {
                            Some(text) => {
                                if active.had_children || active.original_text != text {
                                    modified = true;
                                }
                                if !text.is_empty() {
                                    writer
                                        .write(WriterEvent::characters(text))
                                        .map_err(|e| StripError::xml(part, e))?;
                                }
                                if let Some(end) = event.as_writer_event() {
                                    writer.write(end).map_err(|e| StripError::xml(part, e))?;
                                }
                            }
                            None => modified = true,
                        }
                        skipped = None;
                    }
                }
                ReaderEvent::Characters(text)
                | ReaderEvent::CData(text)
                | ReaderEvent::Whitespace(text) => active.original_text.push_str(text),
                _ => {}
            }
            continue;
        }

        match &event {
            ReaderEvent::StartElement { name, .. } => {
                let action = decide(depth, name);
                match action {
                    ElementAction::Keep => {}
                    ElementAction::Remove => {
                        skipped = Some(Skipped {
                            depth,
                            replacement: None,
                            original_text: String::new(),
                            had_children: false,
                        });
                        depth += 1;
                        continue;
                    }
                    ElementAction::ReplaceText(text) => {
                        skipped = Some(Skipped {
                            depth,
                            replacement: Some(text),
                            original_text: String::new(),
                            had_children: false,
                        });
                    }
                }
                depth += 1;
            }
            ReaderEvent::EndElement { .. } => depth = depth.saturating_sub(1),
            _ => {}
        }

        if let Some(out) = event.as_writer_event() {
            writer.write(out).map_err(|e| StripError::xml(part, e))?;
        }
    }

    drop(writer);
    Ok(modified.then_some(output))
}

/// Lee un XML completo como árbol para consultas de sólo lectura.
pub(crate) fn parse_tree(part: &str, contents: &[u8]) -> Result<Element, StripError> {
    Element::parse(contents).map_err(|e| StripError::xml(part, e))
}

/// Devuelve el texto plano contenido dentro de un elemento.
pub(crate) fn element_text_content(element: &Element) -> String {
    let mut content = String::new();
    for node in &element.children {
        match node {
            XMLNode::Text(text) | XMLNode::CData(text) => content.push_str(text),
            _ => {}
        }
    }
    content.trim().to_string()
}

/// Hijos directos de tipo elemento.
pub(crate) fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Busca el primer hijo directo que coincide con `spec` y devuelve su texto.
pub(crate) fn field_text(root: &Element, spec: FieldSpec<'_>) -> Option<String> {
    child_elements(root)
        .find(|child| spec.matches_element(child))
        .map(element_text_content)
}

/// Recorre el árbol y cuenta los elementos que cumplen `predicate`.
pub(crate) fn count_descendants<P>(root: &Element, predicate: &P) -> usize
where
    P: Fn(&Element) -> bool,
{
    child_elements(root)
        .map(|child| usize::from(predicate(child)) + count_descendants(child, predicate))
        .sum()
}
