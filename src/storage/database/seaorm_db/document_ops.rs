use crate::core::models::{CandidateDocument, EntityKind};
use crate::core::traits::{BulkWriteReport, DocumentStore, DocumentWriteError, WriteErrorKind};
use crate::utils::error::{Result, SuppliesError};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, contact, product, school, vendor};
use super::types::SeaOrmDatabase;

type DocumentFailure = (WriteErrorKind, String);

impl SeaOrmDatabase {
    /// Insert one document. Returns the failure classification instead of
    /// an error so the caller can keep going.
    async fn insert_document(
        &self,
        kind: EntityKind,
        document: CandidateDocument,
    ) -> std::result::Result<(), DocumentFailure> {
        if document.kind() != kind {
            return Err((
                WriteErrorKind::Validation,
                format!("expected a {} document, got {}", kind, document.kind()),
            ));
        }
        if let Some(message) = document.validation_error() {
            return Err((WriteErrorKind::Validation, message));
        }

        let id = Uuid::new_v4();
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = match document {
            CandidateDocument::School(draft) => {
                entities::School::insert(school::ActiveModel {
                    id: Set(id),
                    name: Set(draft.name.unwrap_or_default()),
                    state: Set(draft.state.unwrap_or_default()),
                    district: Set(draft.district.unwrap_or_default()),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .exec_without_returning(&self.db)
                .await
            }
            CandidateDocument::Contact(draft) => {
                entities::Contact::insert(contact::ActiveModel {
                    id: Set(id),
                    name: Set(draft.name.unwrap_or_default()),
                    email: Set(draft.email.unwrap_or_default()),
                    phone: Set(draft.phone.unwrap_or_default()),
                    role: Set(draft.role.unwrap_or_else(|| "general".to_string())),
                    organization: Set(draft.organization),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .exec_without_returning(&self.db)
                .await
            }
            CandidateDocument::Product(draft) => {
                entities::Product::insert(product::ActiveModel {
                    id: Set(id),
                    name: Set(draft.name.unwrap_or_default()),
                    category: Set(draft.category.unwrap_or_default()),
                    price: Set(draft.price.unwrap_or_default()),
                    description: Set(draft.description),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .exec_without_returning(&self.db)
                .await
            }
            CandidateDocument::Vendor(draft) => {
                entities::Vendor::insert(vendor::ActiveModel {
                    id: Set(id),
                    name: Set(draft.name.unwrap_or_default()),
                    contact_person: Set(draft.contact_person.unwrap_or_default()),
                    email: Set(draft.email.unwrap_or_default()),
                    phone: Set(draft.phone.unwrap_or_default()),
                    address: Set(draft.address),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .exec_without_returning(&self.db)
                .await
            }
        };

        result.map(|_| ()).map_err(|e| classify_db_error(kind, e))
    }
}

fn classify_db_error(kind: EntityKind, err: DbErr) -> DocumentFailure {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => (
            WriteErrorKind::DuplicateKey,
            format!("duplicate key error in {}: {}", kind.collection(), detail),
        ),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            (WriteErrorKind::Validation, detail)
        }
        _ => (WriteErrorKind::Storage, err.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDatabase {
    fn backend_name(&self) -> &'static str {
        self.backend_type.name()
    }

    /// Documents are inserted one statement at a time so that every
    /// failure is attributed to its position in the batch.
    async fn insert_many(
        &self,
        kind: EntityKind,
        documents: Vec<CandidateDocument>,
    ) -> Result<BulkWriteReport> {
        debug!("Inserting {} {} documents", documents.len(), kind);

        let mut report = BulkWriteReport::default();
        for (index, document) in documents.into_iter().enumerate() {
            match self.insert_document(kind, document).await {
                Ok(()) => report.inserted += 1,
                Err((error_kind, message)) => {
                    debug!("Document {} of {} rejected: {}", index, kind, message);
                    report.write_errors.push(DocumentWriteError {
                        index,
                        kind: error_kind,
                        message,
                    });
                }
            }
        }

        Ok(report)
    }

    async fn count(&self, kind: EntityKind) -> Result<u64> {
        let count = match kind {
            EntityKind::School => entities::School::find().count(&self.db).await,
            EntityKind::Contact => entities::Contact::find().count(&self.db).await,
            EntityKind::Product => entities::Product::find().count(&self.db).await,
            EntityKind::Vendor => entities::Vendor::find().count(&self.db).await,
        };
        count.map_err(SuppliesError::Database)
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
