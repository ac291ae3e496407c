//! covmerge: merge OpenCover coverage reports
//!
//! Several coverage reports produced independently (one per test run, say)
//! are combined into one report covering the union of all exercised code,
//! with visit counts summed across runs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    COVMERGE Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ io         │    │ merge      │    │ report     │            │
//! │   │ (tokio,    │───►│ (fold,     │───►│ (encode,   │            │
//! │   │  decode)   │    │  remap)    │    │  write)    │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use covmerge::{merge_documents, parse_report};
//!
//! let run = r#"<CoverageSession><Modules><Module>
//!   <ModulePath>Lib.dll</ModulePath>
//!   <Files><File uid="1" fullPath="A.cs"/></Files>
//!   <Classes><Class><FullName>Lib.A</FullName><Methods>
//!     <Method><Name>Run</Name><FileRef uid="1"/><SequencePoints>
//!       <SequencePoint vc="2" uspid="7" fileid="1"/>
//!     </SequencePoints></Method>
//!   </Methods></Class></Classes>
//! </Module></Modules></CoverageSession>"#;
//!
//! let merged = merge_documents([parse_report(run)?, parse_report(run)?])?;
//! let point = merged.modules[0].classes[0].methods[0].point(7).unwrap();
//! assert_eq!(point.visit_count, 4);
//! # Ok::<(), covmerge::MergeError>(())
//! ```

#![warn(missing_docs)]

pub mod io;
pub mod merge;
pub mod report;
mod result;
pub mod xml;

pub use io::{load_report, load_reports, merge_files, write_report};
pub use merge::{merge_documents, CoverageMerger, MergeStats, RemapTable, UidAllocator};
pub use report::{
    encode_session, parse_report, Class, CoverageSession, Method, Module, SequencePoint,
    SourceFile,
};
pub use result::{MergeError, MergeResult};
