use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, Role};
use crate::utils::errors::AppError;

pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    email: &str,
    role: Option<Role>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn token_round_trip_preserves_role() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token =
            create_access_token(user_id, "maria", "maria@nexus.edu", Some(Role::Student), &config)
                .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, Some(Role::Student));
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let config = test_config();
        let token = create_access_token(
            Uuid::new_v4(),
            "maria",
            "maria@nexus.edu",
            Some(Role::Teacher),
            &config,
        )
        .unwrap();

        let other = JwtConfig {
            secret: "another-secret".to_string(),
            access_token_expiry: 3600,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn unresolved_principal_has_no_role() {
        let config = test_config();
        let token =
            create_access_token(Uuid::new_v4(), "ghost", "ghost@nexus.edu", None, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.role, None);
    }
}
