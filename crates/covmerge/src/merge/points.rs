//! Sequence point reconciliation

use super::remap::UidResolver;
use crate::report::SequencePoint;
use std::collections::HashMap;

/// Merge `incoming` points into `accumulated`, matching by `uspid`
///
/// Matched points have their visit counts summed and keep the accumulated
/// file reference. Unmatched points are appended with their `fileid`
/// translated into merged uids.
pub fn reconcile_sequence_points(
    mut accumulated: Vec<SequencePoint>,
    incoming: Vec<SequencePoint>,
    uids: &UidResolver<'_>,
) -> Vec<SequencePoint> {
    let mut by_uspid: HashMap<u64, usize> = HashMap::with_capacity(accumulated.len());
    for (index, point) in accumulated.iter().enumerate() {
        let _ = by_uspid.entry(point.uspid).or_insert(index);
    }

    for mut point in incoming {
        if let Some(&index) = by_uspid.get(&point.uspid) {
            let existing = &mut accumulated[index];
            existing.visit_count = existing.visit_count.saturating_add(point.visit_count);
            continue;
        }

        rebase_point(&mut point, uids);
        let _ = by_uspid.insert(point.uspid, accumulated.len());
        accumulated.push(point);
    }

    accumulated
}

/// Rewrite a point's file reference into merged uids
pub fn rebase_point(point: &mut SequencePoint, uids: &UidResolver<'_>) {
    point.file_id = uids.translate_ref(point.file_id);
}
