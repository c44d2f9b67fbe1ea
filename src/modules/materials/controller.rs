use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::flash;
use crate::utils::media::MediaStore;

use super::model::Material;
use super::service::MaterialService;

/// Upload a course material (multipart: `title`, optional `description`,
/// optional `class_id`, and the `file` itself).
#[utoipa::path(
    post,
    path = "/dashboard/professor/materiais",
    responses(
        (status = 201, description = "Material uploaded", body = Material),
        (status = 400, description = "Missing file or title", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Materials"
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_material(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(teacher) = TeacherService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Teacher role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    let mut title = None;
    let mut description = None;
    let mut class_id = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e)))?
    {
        match field.name() {
            Some("title") => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e))
                })?);
            }
            Some("description") => {
                description = Some(field.text().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e))
                })?);
            }
            Some("class_id") => {
                let raw = field.text().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e))
                })?;
                class_id = Some(
                    Uuid::parse_str(&raw)
                        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid class_id")))?,
                );
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("material").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Invalid upload: {}", e))
                })?;
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let title =
        title.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("title is required")))?;
    let (file_name, bytes) =
        file.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("file is required")))?;

    let key = MediaStore::make_key("materials", &file_name);
    state.media.save(&key, &bytes).await?;

    let material = MaterialService::create_material(
        &state.db,
        teacher.id,
        class_id,
        &title,
        description.as_deref(),
        &key,
    )
    .await?;

    Ok((axum::http::StatusCode::CREATED, Json(material)).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/professor/materiais",
    responses((status = 200, description = "The teacher's uploads, newest first", body = [Material])),
    security(("bearer_auth" = [])),
    tag = "Materials"
)]
#[instrument(skip(state, auth_user))]
pub async fn list_materials(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(teacher) = TeacherService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Teacher role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    let materials = MaterialService::list_for_teacher(&state.db, teacher.id).await?;
    Ok(Json(materials).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/professor/materiais/{id}/download",
    params(("id" = Uuid, Path, description = "Material ID")),
    responses(
        (status = 200, description = "The material file"),
        (status = 404, description = "Material not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Materials"
)]
#[instrument(skip(state))]
pub async fn download_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (material, bytes) = MaterialService::read_file(&state.db, &state.media, id).await?;

    let file_name = material
        .file_path
        .rsplit('/')
        .next()
        .unwrap_or("material");

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build response: {}", e)))
}

#[utoipa::path(
    delete,
    path = "/dashboard/professor/materiais/{id}",
    params(("id" = Uuid, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material deleted"),
        (status = 404, description = "Material not found or not owned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Materials"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_material(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(teacher) = TeacherService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Teacher role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    MaterialService::delete_material(&state.db, &state.media, id, teacher.id).await?;
    Ok(Json(serde_json::json!({"message": "Material deleted successfully"})).into_response())
}
