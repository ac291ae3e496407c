//! File list reconciliation
//!
//! Must run before the class/method/point reconcilers of the same module:
//! they translate file references through the mappings recorded here.

use super::remap::{RemapTable, UidAllocator};
use crate::report::SourceFile;
use crate::result::MergeResult;
use std::collections::HashMap;
use tracing::debug;

/// Merge `incoming` files into `accumulated`, matching by full path
///
/// Every incoming uid is recorded in `remap` under `namespace`: matched files
/// map to the accumulated file's uid, new files map to the fresh uid they are
/// appended with. Accumulated uids never change.
///
/// # Errors
///
/// Returns error if a new file cannot be given a unique uid
pub fn reconcile_files(
    mut accumulated: Vec<SourceFile>,
    incoming: Vec<SourceFile>,
    namespace: &str,
    remap: &mut RemapTable,
    uids: &mut UidAllocator,
) -> MergeResult<Vec<SourceFile>> {
    let mut by_path: HashMap<String, u32> = HashMap::with_capacity(accumulated.len());
    for file in &accumulated {
        let _ = by_path.entry(file.full_path.clone()).or_insert(file.uid);
    }

    for mut file in incoming {
        if let Some(&merged) = by_path.get(&file.full_path) {
            remap.record(namespace, file.uid, merged);
            continue;
        }

        let fresh = uids.fresh()?;
        debug!(
            namespace,
            path = %file.full_path,
            from = file.uid,
            to = fresh,
            "New file renumbered"
        );
        remap.record(namespace, file.uid, fresh);
        file.uid = fresh;
        let _ = by_path.insert(file.full_path.clone(), fresh);
        accumulated.push(file);
    }

    Ok(accumulated)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn claimed(uids: &[u32]) -> UidAllocator {
        let mut allocator = UidAllocator::new();
        for &uid in uids {
            assert!(allocator.claim(uid));
        }
        allocator
    }

    #[test]
    fn test_matched_file_keeps_accumulated_uid() {
        let mut remap = RemapTable::new();
        let mut uids = claimed(&[1]);

        let merged = reconcile_files(
            vec![SourceFile::new(1, "f1.cs")],
            vec![SourceFile::new(7, "f1.cs")],
            "M",
            &mut remap,
            &mut uids,
        )
        .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].uid, 1);
        assert_eq!(remap.resolve("M", 7), Some(1));
        assert_eq!(uids.peek(), 2);
    }

    #[test]
    fn test_new_file_gets_next_global_uid() {
        let mut remap = RemapTable::new();
        let mut uids = claimed(&[1]);

        let merged = reconcile_files(
            vec![SourceFile::new(1, "f1.cs")],
            vec![SourceFile::new(7, "f1.cs"), SourceFile::new(8, "f2.cs")],
            "M",
            &mut remap,
            &mut uids,
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].full_path, "f2.cs");
        assert_eq!(merged[1].uid, 2);
        assert_eq!(remap.resolve("M", 8), Some(2));
    }

    #[test]
    fn test_counter_is_shared_across_namespaces() {
        let mut remap = RemapTable::new();
        let mut uids = claimed(&[1, 2]);

        let a = reconcile_files(
            vec![SourceFile::new(1, "a.cs")],
            vec![SourceFile::new(1, "a2.cs")],
            "A",
            &mut remap,
            &mut uids,
        )
        .unwrap();
        let b = reconcile_files(
            vec![SourceFile::new(2, "b.cs")],
            vec![SourceFile::new(1, "b2.cs")],
            "B",
            &mut remap,
            &mut uids,
        )
        .unwrap();

        assert_eq!(a[1].uid, 3);
        assert_eq!(b[1].uid, 4);
        assert_eq!(remap.resolve("A", 1), Some(3));
        assert_eq!(remap.resolve("B", 1), Some(4));
    }

    #[test]
    fn test_duplicate_incoming_paths_coalesce() {
        let mut remap = RemapTable::new();
        let mut uids = UidAllocator::new();

        let merged = reconcile_files(
            Vec::new(),
            vec![SourceFile::new(4, "x.cs"), SourceFile::new(5, "x.cs")],
            "M",
            &mut remap,
            &mut uids,
        )
        .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(remap.resolve("M", 4), Some(1));
        assert_eq!(remap.resolve("M", 5), Some(1));
    }

    #[test]
    fn test_accumulated_order_is_preserved() {
        let mut remap = RemapTable::new();
        let mut uids = claimed(&[1, 2]);

        let merged = reconcile_files(
            vec![SourceFile::new(1, "a.cs"), SourceFile::new(2, "b.cs")],
            vec![SourceFile::new(1, "c.cs"), SourceFile::new(2, "a.cs")],
            "M",
            &mut remap,
            &mut uids,
        )
        .unwrap();

        let paths: Vec<&str> = merged.iter().map(|f| f.full_path.as_str()).collect();
        assert_eq!(paths, ["a.cs", "b.cs", "c.cs"]);
        assert_eq!(merged[2].uid, 3);
    }

    #[test]
    fn test_new_file_past_max_uid_fails() {
        let mut remap = RemapTable::new();
        let mut uids = claimed(&[u32::MAX]);

        let result = reconcile_files(
            vec![SourceFile::new(u32::MAX, "a.cs")],
            vec![SourceFile::new(u32::MAX, "a.cs"), SourceFile::new(1, "b.cs")],
            "M",
            &mut remap,
            &mut uids,
        );

        assert!(matches!(
            result,
            Err(crate::MergeError::UidSpaceExhausted { .. })
        ));
    }
}
