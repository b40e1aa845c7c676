//! Import orchestration
//!
//! Drives one import through its stages:
//! received -> file acquired -> parsed -> mapped -> written -> cleaned.
//! The temporary upload is released on every path once it was acquired.

use super::error::ImportError;
use super::mapper::FieldMapper;
use super::parser::RecordParser;
use super::types::{ImportFailure, ImportOutcome, ImportRequest, ImportStage, ImportSummary};
use super::writer::BatchWriter;
use crate::core::models::EntityKind;
use crate::core::traits::DocumentStore;
use crate::storage::files::{ScopedUpload, UploadStore, UploadedFile};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Entry point for file imports
pub struct ImportService {
    uploads: Arc<UploadStore>,
    parser: RecordParser,
    mapper: FieldMapper,
    writer: BatchWriter,
}

impl ImportService {
    /// Create the service. Fails if a mapping table is invalid.
    pub fn new(uploads: Arc<UploadStore>, store: Arc<dyn DocumentStore>) -> Result<Self> {
        Ok(Self {
            uploads,
            parser: RecordParser::new(),
            mapper: FieldMapper::new()?,
            writer: BatchWriter::new(store),
        })
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn uploads(&self) -> &Arc<UploadStore> {
        &self.uploads
    }

    /// Run an import to completion.
    ///
    /// The work runs on its own task, so a caller that stops waiting does
    /// not interrupt a bulk insert that is already in progress.
    pub async fn import(self: &Arc<Self>, request: ImportRequest) -> std::result::Result<ImportSummary, ImportError> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run(request).await })
            .await
            .map_err(|e| ImportError::Task(e.to_string()))?
    }

    async fn run(&self, request: ImportRequest) -> std::result::Result<ImportSummary, ImportError> {
        let ImportRequest {
            kind,
            upload,
            identity,
        } = request;
        let mut tracker = StageTracker::new(kind);
        info!(
            import_id = %tracker.import_id,
            entity = %kind,
            user_id = %identity.user_id,
            role = %identity.role,
            "Import received"
        );

        let Some(upload) = upload else {
            warn!(import_id = %tracker.import_id, entity = %kind, "Import rejected: no file uploaded");
            return Err(ImportError::NoFileProvided);
        };

        let file = self
            .uploads
            .acquire(&upload.original_name, &upload.content)
            .await
            .map_err(|e| {
                error!(import_id = %tracker.import_id, "Failed to store upload: {}", e);
                ImportError::Upload(e.to_string())
            })?;
        drop(upload);
        let scoped = ScopedUpload::new(Arc::clone(&self.uploads), file);
        tracker.advance(ImportStage::FileAcquired);

        let result = self.process(kind, scoped.file(), &mut tracker).await;

        scoped.release().await;
        tracker.advance(ImportStage::Cleaned);

        match result {
            Ok(outcome) => {
                let summary = ImportSummary::new(kind, tracker.import_id.clone(), outcome);
                info!(
                    import_id = %tracker.import_id,
                    entity = %kind,
                    attempted = summary.attempted_count,
                    inserted = summary.inserted_count,
                    failed = summary.failed_count,
                    elapsed_ms = tracker.elapsed_ms(),
                    "Import finished"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    import_id = %tracker.import_id,
                    entity = %kind,
                    elapsed_ms = tracker.elapsed_ms(),
                    "Import failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn process(
        &self,
        kind: EntityKind,
        file: &UploadedFile,
        tracker: &mut StageTracker,
    ) -> std::result::Result<ImportOutcome, ImportError> {
        let parser = self.parser;
        let path = file.storage_path.clone();
        let name = file.original_name.clone();
        let records = tokio::task::spawn_blocking(move || parser.parse(&path, &name))
            .await
            .map_err(|e| ImportError::Task(e.to_string()))?
            .inspect_err(|e| {
                error!(
                    import_id = %tracker.import_id,
                    path = %file.storage_path.display(),
                    "Could not parse stored upload: {}",
                    e
                );
            })?;
        tracker.advance(ImportStage::Parsed);

        let attempted = records.len();
        if let Some(table) = self.mapper.table(kind) {
            let missing = table.missing_required_headers(records.headers());
            if !missing.is_empty() && attempted > 0 {
                warn!(
                    import_id = %tracker.import_id,
                    entity = %kind,
                    file = %file.original_name,
                    "Header row is missing required columns: {} (expected {})",
                    missing.join(", "),
                    table.expected_headers().join(", ")
                );
            }
        }

        let mut candidates = Vec::with_capacity(attempted);
        let mut failures: Vec<ImportFailure> = Vec::new();
        for record in records {
            match self.mapper.map_one(&record, kind) {
                Ok(document) => candidates.push((record.row(), document)),
                Err(e) => {
                    debug!(import_id = %tracker.import_id, "Mapping failed: {}", e);
                    failures.push(e.into());
                }
            }
        }
        tracker.advance(ImportStage::Mapped);

        let written = self.writer.insert_all(kind, candidates).await;
        tracker.advance(ImportStage::Written);

        failures.extend(written.failures);
        let mut outcome = ImportOutcome {
            attempted,
            inserted: written.inserted,
            failures,
        };
        outcome.sort_failures();
        Ok(outcome)
    }
}

struct StageTracker {
    import_id: String,
    entity: EntityKind,
    stage: ImportStage,
    started: Instant,
}

impl StageTracker {
    fn new(entity: EntityKind) -> Self {
        Self {
            import_id: Uuid::new_v4().simple().to_string(),
            entity,
            stage: ImportStage::Received,
            started: Instant::now(),
        }
    }

    fn advance(&mut self, next: ImportStage) {
        debug!(
            import_id = %self.import_id,
            entity = %self.entity,
            from = %self.stage,
            to = %next,
            elapsed_ms = self.elapsed_ms(),
            "Import stage transition"
        );
        self.stage = next;
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
