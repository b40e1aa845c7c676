//! Database integration tests
//!
//! Schema and uniqueness behavior of the SeaORM store over in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{school, vendor};
    use sea_orm::EntityTrait;
    use supplies_rs::core::models::{CandidateDocument, EntityKind, ProductDraft};
    use supplies_rs::core::traits::{DocumentStore, WriteErrorKind};
    use supplies_rs::storage::database::entities;
    use supplies_rs::storage::database::DatabaseBackendType;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert!(db.db().migrate().await.is_ok());
        assert_eq!(db.count(EntityKind::School).await, 0);
    }

    #[tokio::test]
    async fn test_backend_reports_sqlite() {
        let db = TestDatabase::new().await;
        assert_eq!(db.db().backend_type(), DatabaseBackendType::SQLite);
        assert_eq!(db.db().backend_name(), "sqlite");
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_vendor_name_and_email_are_each_unique() {
        let db = TestDatabase::new().await;
        db.seed(EntityKind::Vendor, vec![vendor("Acme Supplies", "sales@acme.test")])
            .await;

        let report = db
            .db()
            .insert_many(
                EntityKind::Vendor,
                vec![
                    vendor("Acme Supplies", "other@acme.test"),
                    vendor("Bharat Traders", "sales@acme.test"),
                    vendor("Chennai Paper Co", "orders@cpc.test"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(report.inserted, 1);
        let indices: Vec<_> = report.write_errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(
            report
                .write_errors
                .iter()
                .all(|e| e.kind == WriteErrorKind::DuplicateKey)
        );
        assert_eq!(db.count(EntityKind::Vendor).await, 2);
    }

    #[tokio::test]
    async fn test_duplicates_within_one_batch() {
        let db = TestDatabase::new().await;

        let report = db
            .db()
            .insert_many(
                EntityKind::School,
                vec![school("GHSS Aluva"), school("GHSS Aluva"), school("GLPS Kalady")],
            )
            .await
            .unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.write_errors.len(), 1);
        assert_eq!(report.write_errors[0].index, 1);
    }

    #[tokio::test]
    async fn test_product_price_is_stored_as_number() {
        let db = TestDatabase::new().await;
        db.seed(
            EntityKind::Product,
            vec![CandidateDocument::Product(ProductDraft {
                name: Some("Chalk box".to_string()),
                category: Some("Stationery".to_string()),
                price: Some(45.5),
                description: None,
            })],
        )
        .await;

        let stored = entities::Product::find()
            .all(db.db().connection())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].price, 45.5);
        assert_eq!(stored[0].description, None);
    }
}
