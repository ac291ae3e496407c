//! OpenCover report model and codec

pub mod decode;
pub mod encode;
mod model;

pub use decode::decode_session;
pub use encode::{encode_session, session_element};
pub use model::{Class, CoverageSession, Method, Module, SequencePoint, SourceFile};

use crate::result::MergeResult;
use crate::xml::parse_document;

/// Parse and decode an OpenCover XML document
///
/// # Errors
///
/// Returns error if the text is not well-formed XML or not a valid report
pub fn parse_report(text: &str) -> MergeResult<CoverageSession> {
    decode_session(parse_document(text)?)
}
