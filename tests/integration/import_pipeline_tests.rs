//! Import pipeline integration tests
//!
//! The import service against the SeaORM store over in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::school;
    use crate::common::{CsvBuilder, TestDatabase};
    use sea_orm::EntityTrait;
    use std::sync::Arc;
    use supplies_rs::auth::{Identity, Role};
    use supplies_rs::core::import::{
        FailureKind, FailureStage, ImportRequest, ImportService, IncomingUpload, RecordParser,
    };
    use supplies_rs::core::models::EntityKind;
    use supplies_rs::storage::database::entities;
    use supplies_rs::storage::files::UploadStore;
    use tempfile::TempDir;

    struct Pipeline {
        upload_dir: TempDir,
        db: TestDatabase,
        service: Arc<ImportService>,
    }

    impl Pipeline {
        async fn new() -> Self {
            Self::with_parser(RecordParser::new()).await
        }

        async fn with_parser(parser: RecordParser) -> Self {
            let upload_dir = TempDir::new().unwrap();
            let db = TestDatabase::new().await;
            let uploads = Arc::new(UploadStore::new(upload_dir.path()).await.unwrap());
            let service = ImportService::new(uploads, db.store())
                .unwrap()
                .with_parser(parser);

            Self {
                upload_dir,
                db,
                service: Arc::new(service),
            }
        }

        fn request(&self, kind: EntityKind, csv: Vec<u8>) -> ImportRequest {
            ImportRequest {
                kind,
                upload: Some(IncomingUpload {
                    original_name: format!("{}.csv", kind.collection()),
                    content: csv,
                }),
                identity: Identity::new("ops-admin", Role::Admin),
            }
        }

        fn leftover_uploads(&self) -> usize {
            std::fs::read_dir(self.upload_dir.path()).unwrap().count()
        }
    }

    #[tokio::test]
    async fn test_schools_with_existing_duplicate() {
        let pipeline = Pipeline::new().await;
        pipeline
            .db
            .seed(EntityKind::School, vec![school("GHSS Aluva")])
            .await;

        let csv = CsvBuilder::schools()
            .row(&["GLPS Kalady", "Kerala", "Ernakulam"])
            .row(&["GHSS Aluva", "Kerala", "Ernakulam"])
            .row(&["GUPS Angamaly", "Kerala", "Ernakulam"])
            .build();
        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::School, csv))
            .await
            .unwrap();

        assert_eq!(summary.attempted_count, 3);
        assert_eq!(summary.inserted_count, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].row, Some(2));
        assert_eq!(summary.failures[0].kind, FailureKind::DuplicateKey);
        assert_eq!(pipeline.db.count(EntityKind::School).await, 3);
        assert_eq!(pipeline.leftover_uploads(), 0);
    }

    #[tokio::test]
    async fn test_contacts_are_normalized() {
        let pipeline = Pipeline::new().await;
        let csv = CsvBuilder::contacts()
            .row(&["Asha Menon", "  Asha.Menon@Example.COM ", "9847000001", "", "DEO Office"])
            .row(&["Binu Thomas", "binu@example.com", "9847000002", "principal", ""])
            .build();

        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::Contact, csv))
            .await
            .unwrap();
        assert_eq!(summary.inserted_count, 2);

        let mut contacts = entities::Contact::find()
            .all(pipeline.db.db().connection())
            .await
            .unwrap();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(contacts[0].email, "asha.menon@example.com");
        assert_eq!(contacts[0].role, "general");
        assert_eq!(contacts[0].organization.as_deref(), Some("DEO Office"));
        assert_eq!(contacts[1].role, "principal");
        assert_eq!(contacts[1].organization, None);
    }

    #[tokio::test]
    async fn test_invalid_email_and_price_are_mapping_failures() {
        let pipeline = Pipeline::new().await;

        let contacts = CsvBuilder::contacts()
            .row(&["No At Sign", "not-an-email", "1", "", ""])
            .build();
        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::Contact, contacts))
            .await
            .unwrap();
        assert_eq!(summary.inserted_count, 0);
        assert_eq!(summary.failures[0].stage, FailureStage::Mapping);
        assert_eq!(summary.failures[0].field.as_deref(), Some("Email"));

        let products = CsvBuilder::products()
            .row(&["Duster", "Stationery", "twelve", ""])
            .row(&["Globe", "Teaching aids", "850", "30 cm, metal stand"])
            .build();
        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::Product, products))
            .await
            .unwrap();
        assert_eq!(summary.inserted_count, 1);
        assert_eq!(summary.failures[0].row, Some(1));
        assert_eq!(summary.failures[0].kind, FailureKind::InvalidValue);
        assert_eq!(pipeline.leftover_uploads(), 0);
    }

    #[tokio::test]
    async fn test_short_row_is_malformed_and_others_stored() {
        let pipeline = Pipeline::new().await;
        let csv = b"Name,State,District\nGLPS Kalady,Kerala\nGUPS Angamaly,Kerala,Ernakulam\n".to_vec();

        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::School, csv))
            .await
            .unwrap();

        assert_eq!(summary.inserted_count, 1);
        assert_eq!(summary.failures[0].row, Some(1));
        assert_eq!(summary.failures[0].kind, FailureKind::MalformedRow);
    }

    #[tokio::test]
    async fn test_quoted_multiline_cell() {
        let pipeline = Pipeline::new().await;
        let csv = CsvBuilder::vendors()
            .row(&[
                "Kochi Traders",
                "Suresh",
                "suresh@kochitraders.test",
                "0484 2000000",
                "MG Road,\nErnakulam",
            ])
            .build();

        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::Vendor, csv))
            .await
            .unwrap();
        assert_eq!(summary.inserted_count, 1);

        let vendors = entities::Vendor::find()
            .all(pipeline.db.db().connection())
            .await
            .unwrap();
        assert_eq!(vendors[0].address.as_deref(), Some("MG Road,\nErnakulam"));
    }

    #[tokio::test]
    async fn test_semicolon_delimited_files() {
        let pipeline = Pipeline::with_parser(RecordParser::new().with_delimiter(b';')).await;
        let csv = b"Name;Category;Price;Description\nSlate;Stationery;25,50;\n".to_vec();

        let summary = pipeline
            .service
            .import(pipeline.request(EntityKind::Product, csv))
            .await
            .unwrap();

        // "25,50" is not a number
        assert_eq!(summary.inserted_count, 0);
        assert_eq!(summary.failures[0].field.as_deref(), Some("Price"));
    }

    #[tokio::test]
    async fn test_reimport_reports_every_row_as_duplicate() {
        let pipeline = Pipeline::new().await;
        let csv = CsvBuilder::schools()
            .row(&["GLPS Kalady", "Kerala", "Ernakulam"])
            .row(&["GUPS Angamaly", "Kerala", "Ernakulam"])
            .build();

        let first = pipeline
            .service
            .import(pipeline.request(EntityKind::School, csv.clone()))
            .await
            .unwrap();
        let second = pipeline
            .service
            .import(pipeline.request(EntityKind::School, csv))
            .await
            .unwrap();

        assert_eq!(first.inserted_count, 2);
        assert_eq!(second.inserted_count, 0);
        assert_eq!(second.message, "0 of 2 schools imported; 2 failed.");
        assert!(
            second
                .failures
                .iter()
                .all(|f| f.kind == FailureKind::DuplicateKey)
        );
        assert_ne!(first.import_id, second.import_id);
        assert_eq!(pipeline.leftover_uploads(), 0);
    }
}
