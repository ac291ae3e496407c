//! Module/document driver: folds whole reports into one accumulator

use super::classes::{rebase_class, reconcile_classes};
use super::files::reconcile_files;
use super::remap::{RemapTable, UidAllocator};
use crate::report::{CoverageSession, Module};
use crate::result::MergeResult;
use std::collections::HashMap;
use tracing::{debug, info};

/// Accumulates coverage reports into a single merged session
///
/// Reports are folded in the order they are passed to
/// [`CoverageMerger::merge`]. Identity matching is first-seen-wins for
/// placement: the accumulated entity stays where it is and keeps its
/// passthrough content.
#[derive(Debug, Default)]
pub struct CoverageMerger {
    session: CoverageSession,
    module_index: HashMap<String, usize>,
    remap: RemapTable,
    uids: UidAllocator,
    documents: usize,
}

impl CoverageMerger {
    /// Create a merger with an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one report into the accumulator
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be given a unique uid. The accumulator
    /// may then hold part of the failed document and should be discarded.
    pub fn merge(&mut self, document: CoverageSession) -> MergeResult<()> {
        self.documents += 1;
        debug!(
            document = self.documents,
            modules = document.modules.len(),
            "Merging document"
        );

        for module in document.modules {
            match self.module_index.get(&module.path) {
                Some(&index) => {
                    debug!(module = %module.path, "Merging into existing module");
                    merge_module(
                        &mut self.session.modules[index],
                        module,
                        &mut self.remap,
                        &mut self.uids,
                    )?;
                }
                None => {
                    debug!(module = %module.path, "Adopting new module");
                    let module = adopt_module(module, &mut self.remap, &mut self.uids)?;
                    let _ = self
                        .module_index
                        .insert(module.path.clone(), self.session.modules.len());
                    self.session.modules.push(module);
                }
            }
        }
        Ok(())
    }

    /// Number of reports merged so far
    #[must_use]
    pub const fn documents_merged(&self) -> usize {
        self.documents
    }

    /// The accumulated session so far
    #[must_use]
    pub const fn session(&self) -> &CoverageSession {
        &self.session
    }

    /// Finish merging and hand over the accumulated session
    #[must_use]
    pub fn finish(self) -> CoverageSession {
        info!(
            documents = self.documents,
            modules = self.session.modules.len(),
            remapped_files = self.remap.len(),
            "Merge complete"
        );
        self.session
    }
}

/// Merge a sequence of reports, left to right
///
/// # Errors
///
/// Returns error if a file cannot be given a unique uid
pub fn merge_documents<I>(documents: I) -> MergeResult<CoverageSession>
where
    I: IntoIterator<Item = CoverageSession>,
{
    let mut merger = CoverageMerger::new();
    for document in documents {
        merger.merge(document)?;
    }
    Ok(merger.finish())
}

/// Files first, then classes: class reconciliation reads the mappings the
/// file pass records for this document.
fn merge_module(
    existing: &mut Module,
    incoming: Module,
    remap: &mut RemapTable,
    uids: &mut UidAllocator,
) -> MergeResult<()> {
    let namespace = incoming.path.as_str();
    existing.files = reconcile_files(
        std::mem::take(&mut existing.files),
        incoming.files,
        namespace,
        remap,
        uids,
    )?;
    existing.classes = reconcile_classes(
        std::mem::take(&mut existing.classes),
        incoming.classes,
        &remap.resolver(namespace),
    );
    Ok(())
}

/// Take a module nobody has seen yet as the baseline for its namespace
///
/// Its files keep their uids unless another module already owns one, in
/// which case the file is renumbered and the module's references follow.
fn adopt_module(
    mut module: Module,
    remap: &mut RemapTable,
    uids: &mut UidAllocator,
) -> MergeResult<Module> {
    let mut renumbered = false;
    for file in &mut module.files {
        if uids.claim(file.uid) {
            continue;
        }
        let fresh = uids.fresh()?;
        debug!(
            module = %module.path,
            path = %file.full_path,
            from = file.uid,
            to = fresh,
            "Colliding file uid renumbered"
        );
        remap.record(&module.path, file.uid, fresh);
        file.uid = fresh;
        renumbered = true;
    }

    if renumbered {
        let resolver = remap.resolver(&module.path);
        for class in &mut module.classes {
            rebase_class(class, &resolver);
        }
    }
    Ok(module)
}
