//! Encode the typed report model back to OpenCover XML
//!
//! ## Output Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <CoverageSession>
//!   <Summary/>
//!   <Modules>
//!     <Module hash="..">
//!       <ModulePath>Lib.dll</ModulePath>
//!       <Files>
//!         <File uid="1" fullPath="A.cs"/>
//!       </Files>
//!       <Classes>..</Classes>
//!     </Module>
//!   </Modules>
//! </CoverageSession>
//! ```
//!
//! The session-level summary is always emitted empty; rates are not computed.

use super::model::{Class, CoverageSession, Method, Module, SequencePoint, SourceFile};
use crate::xml::{write_document, Element};

/// Encode a session as a complete XML document
#[must_use]
pub fn encode_session(session: &CoverageSession) -> String {
    write_document(&session_element(session))
}

/// Build the `<CoverageSession>` element for a session
#[must_use]
pub fn session_element(session: &CoverageSession) -> Element {
    let modules = session.modules.iter().map(module_element).collect();
    Element::new("CoverageSession")
        .with_child(Element::new("Summary"))
        .with_child(Element {
            children: modules,
            ..Element::new("Modules")
        })
}

fn module_element(module: &Module) -> Element {
    let mut element = module.shell.clone();
    splice(
        &mut element,
        "Files",
        "File",
        module.files.iter().map(file_element).collect(),
    );
    splice(
        &mut element,
        "Classes",
        "Class",
        module.classes.iter().map(class_element).collect(),
    );
    element
}

fn file_element(file: &SourceFile) -> Element {
    let mut element = file.shell.clone();
    element.set_attribute("uid", file.uid);
    element
}

fn class_element(class: &Class) -> Element {
    let mut element = class.shell.clone();
    splice(
        &mut element,
        "Methods",
        "Method",
        class.methods.iter().map(method_element).collect(),
    );
    element
}

fn method_element(method: &Method) -> Element {
    let mut element = method.shell.clone();
    if let Some(uid) = method.file_ref {
        match element.child_mut("FileRef") {
            Some(file_ref) => file_ref.set_attribute("uid", uid),
            None => element
                .children
                .push(Element::new("FileRef").with_attribute("uid", uid)),
        }
    }
    splice(
        &mut element,
        "SequencePoints",
        "SequencePoint",
        method.sequence_points.iter().map(point_element).collect(),
    );
    element
}

fn point_element(point: &SequencePoint) -> Element {
    let mut element = point.shell.clone();
    element.set_attribute("vc", point.visit_count);
    if let Some(file_id) = point.file_id {
        element.set_attribute("fileid", file_id);
    }
    element
}

/// Put `items` back into the `wrapper` child of `parent`, creating the
/// wrapper when there is something to put in it
fn splice(parent: &mut Element, wrapper: &str, item: &str, items: Vec<Element>) {
    match parent.child_mut(wrapper) {
        Some(existing) => {
            existing.children.retain(|child| child.name != item);
            existing.children.extend(items);
        }
        None if !items.is_empty() => parent.children.push(Element {
            children: items,
            ..Element::new(wrapper)
        }),
        None => {}
    }
}
