use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::media::MediaConfig;
use crate::utils::media::MediaStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub media: MediaStore,
}

pub async fn init_app_state() -> AppState {
    let media_config = MediaConfig::from_env();
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        media: MediaStore::new(media_config.root),
    }
}
