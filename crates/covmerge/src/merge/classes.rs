//! Class list reconciliation

use super::methods::{rebase_method, reconcile_methods};
use super::remap::UidResolver;
use crate::report::Class;
use std::collections::HashMap;
use tracing::debug;

/// Merge `incoming` classes into `accumulated`, matching by full name
pub fn reconcile_classes(
    mut accumulated: Vec<Class>,
    incoming: Vec<Class>,
    uids: &UidResolver<'_>,
) -> Vec<Class> {
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(accumulated.len());
    for (index, class) in accumulated.iter().enumerate() {
        let _ = by_name.entry(class.full_name.clone()).or_insert(index);
    }

    for mut class in incoming {
        if let Some(&index) = by_name.get(&class.full_name) {
            let existing = &mut accumulated[index];
            existing.methods =
                reconcile_methods(std::mem::take(&mut existing.methods), class.methods, uids);
            continue;
        }

        debug!(
            namespace = uids.namespace(),
            class = %class.full_name,
            "New class adopted"
        );
        rebase_class(&mut class, uids);
        let _ = by_name.insert(class.full_name.clone(), accumulated.len());
        accumulated.push(class);
    }

    accumulated
}

/// Rewrite every file reference inside a class
pub fn rebase_class(class: &mut Class, uids: &UidResolver<'_>) {
    for method in &mut class.methods {
        rebase_method(method, uids);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::merge::remap::RemapTable;
    use crate::report::{Method, SequencePoint};

    #[test]
    fn test_matched_class_merges_methods() {
        let table = RemapTable::new();
        let merged = reconcile_classes(
            vec![Class::new("Ns.C").with_method(Method::new("a").with_point(SequencePoint::new(1, 1)))],
            vec![Class::new("Ns.C")
                .with_method(Method::new("a").with_point(SequencePoint::new(1, 4)))
                .with_method(Method::new("b"))],
            &table.resolver("M"),
        );

        assert_eq!(merged.len(), 1);
        let methods: Vec<&str> = merged[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["a", "b"]);
        assert_eq!(merged[0].methods[0].sequence_points[0].visit_count, 5);
    }

    #[test]
    fn test_new_class_is_adopted_and_rebased() {
        let mut table = RemapTable::new();
        table.record("M", 3, 9);

        let merged = reconcile_classes(
            vec![Class::new("Ns.A")],
            vec![Class::new("Ns.B").with_method(
                Method::new("x")
                    .with_file_ref(3)
                    .with_point(SequencePoint::new(1, 1).with_file_id(3)),
            )],
            &table.resolver("M"),
        );

        assert_eq!(merged.len(), 2);
        let method = &merged[1].methods[0];
        assert_eq!(method.file_ref, Some(9));
        assert_eq!(method.sequence_points[0].file_id, Some(9));
    }

    #[test]
    fn test_empty_incoming_is_identity() {
        let table = RemapTable::new();
        let accumulated = vec![Class::new("A"), Class::new("B")];
        let merged = reconcile_classes(accumulated.clone(), Vec::new(), &table.resolver("M"));
        assert_eq!(merged, accumulated);
    }
}
