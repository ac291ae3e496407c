//! Typed OpenCover report model
//!
//! Each record holds the fields the merge reads or rewrites, plus the raw
//! element it was decoded from (its "shell"). The shell carries everything
//! else the report contains (`Summary`, `MethodPoint`, `BranchPoints`, line
//! and column attributes, ...) so it can be written back unchanged. Modeled
//! collections are removed from the shell on decode and spliced back in on
//! encode.

use crate::xml::Element;

/// A whole coverage document (`<CoverageSession>`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageSession {
    /// Modules in document order
    pub modules: Vec<Module>,
}

impl CoverageSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module (builder style)
    #[must_use]
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Find a module by its path
    #[must_use]
    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.path == path)
    }
}

/// A compiled unit (`<Module>`), identified by its module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// `ModulePath` text; also the namespace for file uid remapping
    pub path: String,
    /// Source files referenced by this module
    pub files: Vec<SourceFile>,
    /// Classes declared in this module
    pub classes: Vec<Class>,
    pub(crate) shell: Element,
}

impl Module {
    /// Create a module with no files or classes
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let shell = Element::new("Module")
            .with_child(Element::new("ModulePath").with_text(path.clone()))
            .with_child(Element::new("Files"))
            .with_child(Element::new("Classes"));
        Self {
            path,
            files: Vec::new(),
            classes: Vec::new(),
            shell,
        }
    }

    /// Add a file (builder style)
    #[must_use]
    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    /// Add a class (builder style)
    #[must_use]
    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    /// Find a file by its full path
    #[must_use]
    pub fn file(&self, full_path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.full_path == full_path)
    }

    /// Find a class by its full name
    #[must_use]
    pub fn class(&self, full_name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.full_name == full_name)
    }
}

/// A source file (`<File uid=".." fullPath=".."/>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Document-wide file identifier, reassigned during merge
    pub uid: u32,
    /// Absolute source path; the identity key within a module
    pub full_path: String,
    pub(crate) shell: Element,
}

impl SourceFile {
    /// Create a file entry
    #[must_use]
    pub fn new(uid: u32, full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let shell = Element::new("File")
            .with_attribute("uid", uid)
            .with_attribute("fullPath", full_path.clone());
        Self {
            uid,
            full_path,
            shell,
        }
    }
}

/// A class (`<Class>`), identified by its fully qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// `FullName` text
    pub full_name: String,
    /// Methods declared in this class
    pub methods: Vec<Method>,
    pub(crate) shell: Element,
}

impl Class {
    /// Create a class with no methods
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let shell = Element::new("Class")
            .with_child(Element::new("FullName").with_text(full_name.clone()))
            .with_child(Element::new("Methods"));
        Self {
            full_name,
            methods: Vec::new(),
            shell,
        }
    }

    /// Add a method (builder style)
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Find a method by name
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A method (`<Method>`), identified by its name within its class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// `Name` text (the full signature in OpenCover output)
    pub name: String,
    /// `FileRef/@uid`, absent for methods without source
    pub file_ref: Option<u32>,
    /// Instrumented points in this method
    pub sequence_points: Vec<SequencePoint>,
    pub(crate) shell: Element,
}

impl Method {
    /// Create a method with no sequence points and no file reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let shell = Element::new("Method")
            .with_child(Element::new("Name").with_text(name.clone()))
            .with_child(Element::new("SequencePoints"));
        Self {
            name,
            file_ref: None,
            sequence_points: Vec::new(),
            shell,
        }
    }

    /// Set the file reference (builder style)
    #[must_use]
    pub const fn with_file_ref(mut self, uid: u32) -> Self {
        self.file_ref = Some(uid);
        self
    }

    /// Add a sequence point (builder style)
    #[must_use]
    pub fn with_point(mut self, point: SequencePoint) -> Self {
        self.sequence_points.push(point);
        self
    }

    /// Find a sequence point by uspid
    #[must_use]
    pub fn point(&self, uspid: u64) -> Option<&SequencePoint> {
        self.sequence_points.iter().find(|p| p.uspid == uspid)
    }
}

/// An instrumented source location (`<SequencePoint>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePoint {
    /// Identifier stable across reports for the same location
    pub uspid: u64,
    /// Number of times the point executed
    pub visit_count: u64,
    /// `fileid` attribute, a File uid
    pub file_id: Option<u32>,
    pub(crate) shell: Element,
}

impl SequencePoint {
    /// Create a sequence point
    #[must_use]
    pub fn new(uspid: u64, visit_count: u64) -> Self {
        let shell = Element::new("SequencePoint")
            .with_attribute("vc", visit_count)
            .with_attribute("uspid", uspid);
        Self {
            uspid,
            visit_count,
            file_id: None,
            shell,
        }
    }

    /// Set the file reference (builder style)
    #[must_use]
    pub const fn with_file_id(mut self, uid: u32) -> Self {
        self.file_id = Some(uid);
        self
    }
}
