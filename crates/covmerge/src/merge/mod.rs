//! Coverage report merging
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CoverageMerger (one per run, owns RemapTable + UidAllocator)   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  per document, per module (matched by ModulePath):              │
//! │    1. reconcile_files    records input uid → merged uid         │
//! │    2. reconcile_classes  by FullName                            │
//! │         └─ reconcile_methods          by Name                   │
//! │              └─ reconcile_sequence_points   by uspid, vc summed │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reconcilers take the accumulated list by value and return it extended.
//! Anything moved over from an incoming report has its file references
//! translated through the module's remap table on the way in; entities that
//! are already accumulated are never re-translated.

mod classes;
mod driver;
mod files;
mod methods;
mod points;
mod remap;
mod stats;

pub use classes::{rebase_class, reconcile_classes};
pub use driver::{merge_documents, CoverageMerger};
pub use files::reconcile_files;
pub use methods::{rebase_method, reconcile_methods};
pub use points::{rebase_point, reconcile_sequence_points};
pub use remap::{RemapTable, UidAllocator, UidResolver};
pub use stats::MergeStats;
