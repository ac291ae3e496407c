//! Counts describing a merged report

use crate::report::CoverageSession;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity counts of a merged session
///
/// These are plain tallies of the merged tree; no coverage rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Reports that went into the merge
    pub documents: usize,
    /// Distinct modules
    pub modules: usize,
    /// Distinct source files
    pub files: usize,
    /// Distinct classes
    pub classes: usize,
    /// Distinct methods
    pub methods: usize,
    /// Distinct sequence points
    pub sequence_points: usize,
    /// Sequence points with at least one visit
    pub visited_points: usize,
    /// Sum of all sequence point visit counts
    pub total_visits: u64,
}

impl MergeStats {
    /// Tally a merged session
    #[must_use]
    pub fn from_session(session: &CoverageSession, documents: usize) -> Self {
        let mut stats = Self {
            documents,
            modules: session.modules.len(),
            ..Self::default()
        };

        for module in &session.modules {
            stats.files += module.files.len();
            stats.classes += module.classes.len();
            for class in &module.classes {
                stats.methods += class.methods.len();
                for method in &class.methods {
                    stats.sequence_points += method.sequence_points.len();
                    for point in &method.sequence_points {
                        if point.visit_count > 0 {
                            stats.visited_points += 1;
                        }
                        stats.total_visits = stats.total_visits.saturating_add(point.visit_count);
                    }
                }
            }
        }

        stats
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merged {} report(s)", self.documents)?;
        writeln!(f, "  Modules:         {}", self.modules)?;
        writeln!(f, "  Files:           {}", self.files)?;
        writeln!(f, "  Classes:         {}", self.classes)?;
        writeln!(f, "  Methods:         {}", self.methods)?;
        writeln!(
            f,
            "  Sequence points: {} ({} visited)",
            self.sequence_points, self.visited_points
        )?;
        write!(f, "  Total visits:    {}", self.total_visits)
    }
}
