use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::foreign_key_violation;
use crate::utils::errors::AppError;
use crate::utils::media::MediaStore;

use super::model::{CreateDocumentDto, Document, DocumentListParams, DocumentStatus};

const DOCUMENT_COLUMNS: &str =
    "id, student_id, kind, status, file_path, requested_on, updated_at";

pub struct DocumentService;

impl DocumentService {
    #[instrument(skip(db, dto))]
    pub async fn create_document(
        db: &PgPool,
        dto: CreateDocumentDto,
    ) -> Result<Document, AppError> {
        sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (student_id, kind)
             VALUES ($1, $2)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(&dto.kind)
        .fetch_one(db)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db, params))]
    pub async fn list_documents(
        db: &PgPool,
        params: &DocumentListParams,
    ) -> Result<Vec<Document>, AppError> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::uuid IS NULL OR student_id = $2)
             ORDER BY requested_on DESC"
        ))
        .bind(&params.status)
        .bind(params.student_id)
        .fetch_all(db)
        .await
        .context("Failed to list documents")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_document(db: &PgPool, id: Uuid) -> Result<Document, AppError> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document not found")))
    }

    /// Move a document one step along pending -> issued -> delivered.
    /// Any other jump is reported with the generic failure message.
    #[instrument(skip(db))]
    pub async fn transition(
        db: &PgPool,
        id: Uuid,
        next: DocumentStatus,
        file_path: Option<String>,
    ) -> Result<Document, AppError> {
        let document = Self::get_document(db, id).await?;

        let current = DocumentStatus::parse(&document.status)
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Corrupt document status")))?;

        if !current.can_transition_to(next) {
            return Err(AppError::could_not_complete());
        }

        sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents
             SET status = $1, file_path = COALESCE($2, file_path), updated_at = NOW()
             WHERE id = $3
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(next.as_str())
        .bind(&file_path)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update document status")
        .map_err(AppError::database)
    }

    /// Stream a document's file back, when one was attached at issuing.
    #[instrument(skip(db, media))]
    pub async fn read_file(
        db: &PgPool,
        media: &MediaStore,
        id: Uuid,
    ) -> Result<(Document, Vec<u8>), AppError> {
        let document = Self::get_document(db, id).await?;
        let key = document
            .file_path
            .clone()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document has no file")))?;
        let bytes = media.read(&key).await?;
        Ok((document, bytes))
    }
}
