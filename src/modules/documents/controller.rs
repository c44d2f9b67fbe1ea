use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::Response,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::media::MediaStore;
use crate::validator::ValidatedJson;

use super::model::{CreateDocumentDto, Document, DocumentListParams, DocumentStatus};
use super::service::DocumentService;

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/documentos",
    request_body = CreateDocumentDto,
    responses(
        (status = 201, description = "Document request registered", body = Document),
        (status = 400, description = "Unknown student", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state, dto))]
pub async fn create_document(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDocumentDto>,
) -> Result<(axum::http::StatusCode, Json<Document>), AppError> {
    let document = DocumentService::create_document(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/documentos",
    responses((status = 200, description = "Documents, optionally filtered by status/student", body = [Document])),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state, params))]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentListParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(DocumentService::list_documents(&state.db, &params).await?))
}

/// Issue a pending document, optionally attaching the generated file.
#[utoipa::path(
    post,
    path = "/dashboard/secretaria/documentos/{id}/emitir",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document issued", body = Document),
        (status = 400, description = "Document is not pending", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state, multipart))]
pub async fn issue_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let mut file_path = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("document.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e)))?;

            let key = MediaStore::make_key("documents", &file_name);
            state.media.save(&key, &bytes).await?;
            file_path = Some(key);
        }
    }

    let document =
        DocumentService::transition(&state.db, id, DocumentStatus::Issued, file_path).await?;
    Ok(Json(document))
}

/// Mark an issued document as handed over to the student.
#[utoipa::path(
    post,
    path = "/dashboard/secretaria/documentos/{id}/entregar",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document delivered", body = Document),
        (status = 400, description = "Document is not issued", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn deliver_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let document =
        DocumentService::transition(&state.db, id, DocumentStatus::Delivered, None).await?;
    Ok(Json(document))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/documentos/{id}/download",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "The document file"),
        (status = 404, description = "No file attached", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (document, bytes) = DocumentService::read_file(&state.db, &state.media, id).await?;

    let file_name = document
        .file_path
        .as_deref()
        .and_then(|p| p.rsplit('/').next())
        .unwrap_or("document");

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build response: {}", e)))
}
