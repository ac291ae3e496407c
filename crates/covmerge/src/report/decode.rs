//! Decode a parsed element tree into the typed report model
//!
//! All structural validation happens here, so the merge itself can assume
//! every identity key and counter is present and well formed.

use super::model::{Class, CoverageSession, Method, Module, SequencePoint, SourceFile};
use crate::result::{MergeError, MergeResult};
use crate::xml::Element;
use std::str::FromStr;

/// Decode a `<CoverageSession>` root element
///
/// # Errors
///
/// Returns error if the root is not a coverage session, or if any required
/// identity key or counter is missing or not a number
pub fn decode_session(mut root: Element) -> MergeResult<CoverageSession> {
    if root.name != "CoverageSession" {
        return Err(MergeError::UnexpectedRoot { found: root.name });
    }

    let modules = take_items(&mut root, "Modules", "Module")
        .into_iter()
        .map(decode_module)
        .collect::<MergeResult<Vec<_>>>()?;

    Ok(CoverageSession { modules })
}

fn decode_module(mut shell: Element) -> MergeResult<Module> {
    let path = required_text(&shell, "ModulePath")?;
    let files = take_items(&mut shell, "Files", "File")
        .into_iter()
        .map(decode_file)
        .collect::<MergeResult<Vec<_>>>()?;
    let classes = take_items(&mut shell, "Classes", "Class")
        .into_iter()
        .map(decode_class)
        .collect::<MergeResult<Vec<_>>>()?;

    Ok(Module {
        path,
        files,
        classes,
        shell,
    })
}

fn decode_file(shell: Element) -> MergeResult<SourceFile> {
    let uid = required_number(&shell, "uid")?;
    let full_path = required_attribute(&shell, "fullPath")?.to_string();
    Ok(SourceFile {
        uid,
        full_path,
        shell,
    })
}

fn decode_class(mut shell: Element) -> MergeResult<Class> {
    let full_name = required_text(&shell, "FullName")?;
    let methods = take_items(&mut shell, "Methods", "Method")
        .into_iter()
        .map(decode_method)
        .collect::<MergeResult<Vec<_>>>()?;
    Ok(Class {
        full_name,
        methods,
        shell,
    })
}

fn decode_method(mut shell: Element) -> MergeResult<Method> {
    let name = required_text(&shell, "Name")?;
    let file_ref = match shell.child("FileRef") {
        Some(file_ref) => Some(required_number(file_ref, "uid")?),
        None => None,
    };
    let sequence_points = take_items(&mut shell, "SequencePoints", "SequencePoint")
        .into_iter()
        .map(decode_point)
        .collect::<MergeResult<Vec<_>>>()?;
    Ok(Method {
        name,
        file_ref,
        sequence_points,
        shell,
    })
}

fn decode_point(shell: Element) -> MergeResult<SequencePoint> {
    let uspid = required_number(&shell, "uspid")?;
    let visit_count = required_number(&shell, "vc")?;
    let file_id = optional_number(&shell, "fileid")?;
    Ok(SequencePoint {
        uspid,
        visit_count,
        file_id,
        shell,
    })
}

/// Remove the `item` children of the `wrapper` child of `parent`
///
/// A missing wrapper yields no items. Any wrapper children with another name
/// stay where they are.
fn take_items(parent: &mut Element, wrapper: &str, item: &str) -> Vec<Element> {
    let Some(wrapper) = parent.child_mut(wrapper) else {
        return Vec::new();
    };
    let (items, rest): (Vec<Element>, Vec<Element>) = std::mem::take(&mut wrapper.children)
        .into_iter()
        .partition(|child| child.name == item);
    wrapper.children = rest;
    items
}

fn required_text(element: &Element, child: &str) -> MergeResult<String> {
    element
        .child(child)
        .map(|c| c.text.clone().unwrap_or_default())
        .ok_or_else(|| MergeError::missing_element(&element.name, child))
}

fn required_attribute<'a>(element: &'a Element, attribute: &str) -> MergeResult<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| MergeError::missing_attribute(&element.name, attribute))
}

fn required_number<T: FromStr>(element: &Element, attribute: &str) -> MergeResult<T> {
    parse_number(element, attribute, required_attribute(element, attribute)?)
}

fn optional_number<T: FromStr>(element: &Element, attribute: &str) -> MergeResult<Option<T>> {
    element
        .attribute(attribute)
        .map(|raw| parse_number(element, attribute, raw))
        .transpose()
}

fn parse_number<T: FromStr>(element: &Element, attribute: &str, raw: &str) -> MergeResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| MergeError::invalid_number(&element.name, attribute, raw))
}
