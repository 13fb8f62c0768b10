use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use clinic_shared::errors::AppError;
use clinic_shared::types::auth::{AuthSession, Claims, UserRole};

pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
}

pub fn create_session(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    access_ttl: i64,
) -> Result<AuthSession, AppError> {
    let access_token = create_access_token(user_id, role, secret, access_ttl)?;
    Ok(AuthSession::new(access_token, access_ttl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn access_token_decodes_back_to_claims() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, UserRole::Admin, "test-secret", 3600).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret".as_bytes()),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.role, UserRole::Admin);
    }

    #[test]
    fn session_is_bearer() {
        let session = create_session(Uuid::new_v4(), UserRole::User, "s", 60).unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 60);
    }
}
