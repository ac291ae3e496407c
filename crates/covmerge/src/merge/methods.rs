//! Method list reconciliation

use super::points::{rebase_point, reconcile_sequence_points};
use super::remap::UidResolver;
use crate::report::Method;
use std::collections::HashMap;

/// Merge `incoming` methods into `accumulated`, matching by name
///
/// Matched methods merge their sequence points. Unmatched methods are
/// appended whole, with every file reference in them translated.
pub fn reconcile_methods(
    mut accumulated: Vec<Method>,
    incoming: Vec<Method>,
    uids: &UidResolver<'_>,
) -> Vec<Method> {
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(accumulated.len());
    for (index, method) in accumulated.iter().enumerate() {
        let _ = by_name.entry(method.name.clone()).or_insert(index);
    }

    for mut method in incoming {
        if let Some(&index) = by_name.get(&method.name) {
            let existing = &mut accumulated[index];
            existing.sequence_points = reconcile_sequence_points(
                std::mem::take(&mut existing.sequence_points),
                method.sequence_points,
                uids,
            );
            continue;
        }

        rebase_method(&mut method, uids);
        let _ = by_name.insert(method.name.clone(), accumulated.len());
        accumulated.push(method);
    }

    accumulated
}

/// Rewrite a method's file reference and those of its points
pub fn rebase_method(method: &mut Method, uids: &UidResolver<'_>) {
    method.file_ref = uids.translate_ref(method.file_ref);
    for point in &mut method.sequence_points {
        rebase_point(point, uids);
    }
}
