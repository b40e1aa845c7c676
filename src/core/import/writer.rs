//! Unordered bulk writer
//!
//! Submits every candidate in one `insert_many` call and translates the
//! store's per-index report back to data row numbers. Whatever the store
//! does not account for is reported as an aggregate failure.

use super::types::ImportFailure;
use crate::core::models::{CandidateDocument, EntityKind};
use crate::core::traits::DocumentStore;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Stored count and write-stage failures of one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOutcome {
    pub inserted: usize,
    pub failures: Vec<ImportFailure>,
}

/// Writes candidate documents through a [`DocumentStore`]
#[derive(Clone)]
pub struct BatchWriter {
    store: Arc<dyn DocumentStore>,
}

impl BatchWriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Insert `(row, document)` pairs. Never fails as a whole: a store
    /// error becomes one aggregate failure covering the batch.
    pub async fn insert_all(
        &self,
        kind: EntityKind,
        candidates: Vec<(usize, CandidateDocument)>,
    ) -> WriteOutcome {
        if candidates.is_empty() {
            return WriteOutcome::default();
        }

        let (rows, documents): (Vec<usize>, Vec<CandidateDocument>) = candidates.into_iter().unzip();
        let submitted = documents.len();
        debug!(
            entity = %kind,
            backend = self.store.backend_name(),
            submitted,
            "Submitting bulk insert"
        );

        let report = match self.store.insert_many(kind, documents).await {
            Ok(report) => report,
            Err(e) => {
                error!(entity = %kind, submitted, "Bulk insert failed: {}", e);
                return WriteOutcome {
                    inserted: 0,
                    failures: vec![ImportFailure::aggregate(
                        submitted,
                        format!("Bulk insert failed: {}", e),
                    )],
                };
            }
        };

        let accounted = report.accounted();
        let mut failures = Vec::with_capacity(report.write_errors.len() + 1);
        let mut stray = Vec::new();
        for write_error in report.write_errors {
            match rows.get(write_error.index) {
                Some(row) => failures.push(ImportFailure::write(
                    *row,
                    write_error.kind,
                    write_error.message,
                )),
                None => stray.push(write_error),
            }
        }

        if !stray.is_empty() {
            warn!(
                entity = %kind,
                count = stray.len(),
                "Storage reported failures at positions outside the batch"
            );
            failures.push(ImportFailure::aggregate(
                stray.len(),
                format!(
                    "{} failures reported at unknown positions: {}",
                    stray.len(),
                    stray[0].message
                ),
            ));
        }

        if let Some(unattributed) = report.unattributed {
            failures.push(ImportFailure::aggregate(unattributed.count, unattributed.message));
        }

        if accounted < submitted {
            let missing = submitted - accounted;
            warn!(entity = %kind, submitted, accounted, "Bulk insert report is incomplete");
            failures.push(ImportFailure::aggregate(
                missing,
                format!(
                    "{} documents were not accounted for by storage",
                    missing
                ),
            ));
        } else if accounted > submitted {
            warn!(
                entity = %kind,
                submitted,
                accounted,
                "Bulk insert report accounts for more documents than were submitted"
            );
        }

        WriteOutcome {
            inserted: report.inserted.min(submitted),
            failures,
        }
    }
}
