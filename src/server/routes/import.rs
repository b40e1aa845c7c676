//! Batch import endpoint
//!
//! `POST /api/import/{entity}` takes a multipart form whose file field holds
//! a CSV document and answers with an [`ImportSummary`].

use crate::auth::Identity;
use crate::core::import::{ImportRequest, ImportSummary, IncomingUpload};
use crate::core::models::EntityKind;
use crate::server::state::AppState;
use crate::utils::error::{Result, SuppliesError};
use crate::utils::format_bytes;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use tracing::{debug, info};

/// Configure import routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/import").route("/{entity}", web::post().to(import_entity)));
}

async fn import_entity(
    state: web::Data<AppState>,
    entity: web::Path<String>,
    identity: Identity,
    payload: Multipart,
) -> Result<HttpResponse> {
    let kind = EntityKind::from_collection(&entity)
        .ok_or_else(|| SuppliesError::not_found(format!("Unknown import entity: {}", entity)))?;

    state.auth.authorize_import(&identity)?;

    let uploads = &state.config.uploads;
    let upload = read_upload(payload, &uploads.field_name, uploads.max_upload_bytes).await?;
    if let Some(upload) = &upload {
        info!(
            "Received {} upload {} ({}) from {}",
            kind,
            upload.original_name,
            format_bytes(upload.content.len() as u64),
            identity.user_id
        );
    }

    let summary: ImportSummary = state
        .imports
        .import(ImportRequest {
            kind,
            upload,
            identity,
        })
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Buffer the first file part named `field_name`. Parts without a filename
/// (plain form fields, empty file inputs) and every other part are drained
/// and discarded.
async fn read_upload(
    mut payload: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<Option<IncomingUpload>> {
    let mut upload: Option<IncomingUpload> = None;

    while let Some(mut field) = payload.try_next().await.map_err(invalid_multipart)? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let original_name = match filename {
            Some(name) if upload.is_none() && field.name() == Some(field_name) => name,
            _ => {
                debug!("Skipping multipart field {:?}", field.name());
                while field.try_next().await.map_err(invalid_multipart)?.is_some() {}
                continue;
            }
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(invalid_multipart)? {
            if content.len() + chunk.len() > max_bytes {
                return Err(SuppliesError::payload_too_large(format!(
                    "Upload exceeds the limit of {}",
                    format_bytes(max_bytes as u64)
                )));
            }
            content.extend_from_slice(&chunk);
        }

        upload = Some(IncomingUpload {
            original_name,
            content,
        });
    }

    Ok(upload)
}

fn invalid_multipart(e: actix_multipart::MultipartError) -> SuppliesError {
    SuppliesError::bad_request(format!("Invalid multipart payload: {}", e))
}
