//! Result and error types for covmerge.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for covmerge operations
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while loading, merging, or writing reports
#[derive(Debug, Error)]
pub enum MergeError {
    /// An input report could not be read or decoded
    #[error("Failed to load {}: {source}", path.display())]
    Load {
        /// Path of the input report
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<MergeError>,
    },

    /// The merged report could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Document root is not a coverage session
    #[error("Expected <CoverageSession> root element, found <{found}>")]
    UnexpectedRoot {
        /// Name of the root element actually found
        found: String,
    },

    /// A required child element is missing
    #[error("<{parent}> is missing required child <{child}>")]
    MissingElement {
        /// Parent element name
        parent: String,
        /// Missing child element name
        child: String,
    },

    /// A required attribute is missing
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element name
        element: String,
        /// Missing attribute name
        attribute: String,
    },

    /// A numeric attribute could not be parsed
    #[error("<{element}> attribute '{attribute}' is not a valid number: {value:?}")]
    InvalidNumber {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Raw attribute value
        value: String,
    },

    /// The document is not well-formed markup
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended before all elements were closed
    #[error("Malformed XML: unexpected end of document inside <{open}>")]
    UnexpectedEof {
        /// Innermost element still open
        open: String,
    },

    /// The document contains no root element
    #[error("Malformed XML: document has no root element")]
    EmptyDocument,

    /// Every file uid above the highest one in use has been handed out
    #[error("No file uid left to assign above {highest}")]
    UidSpaceExhausted {
        /// Highest uid in use
        highest: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeError {
    /// Create a missing element error
    #[must_use]
    pub fn missing_element(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::MissingElement {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Create a missing attribute error
    #[must_use]
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid number error
    #[must_use]
    pub fn invalid_number(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Wrap a failure as a load error for `path`
    #[must_use]
    pub fn load(path: impl Into<PathBuf>, source: Self) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
