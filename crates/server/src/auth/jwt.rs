use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token type discriminator; only access tokens are accepted by this API.
const TOKEN_TYPE_ACCESS: &str = "access";

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated user.
    pub sub: i64,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default)]
    pub typ: String,
}

fn jwt_secret() -> Result<String, jsonwebtoken::errors::Error> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into())
}

pub fn access_token_expiry_minutes() -> i64 {
    std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60)
}

pub fn create_access_token(user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(access_token_expiry_minutes())).timestamp(),
        jti: Some(uuid::Uuid::new_v4().to_string()),
        typ: TOKEN_TYPE_ACCESS.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

/// Validate an access token and return its claims. Rejects tokens whose
/// `typ` is anything other than `access`.
pub fn validate_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    if token_data.claims.typ != TOKEN_TYPE_ACCESS {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(token_data.claims)
}
