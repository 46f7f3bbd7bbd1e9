use std::future::{Ready, ready};

use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::routes::ApiResponse;

/// Lifetime of an issued admin token.
pub const TOKEN_TTL_HOURS: i64 = 6;

/// Claims carried by an admin JWT.
///
/// Doubles as the actix extractor used by every authenticated handler: the
/// token is read from the `Authorization: Bearer` header and validated
/// against the secret held in [`ServerConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedAdmin {
    /// Admin id the token was issued for.
    pub sub: i32,
    pub username: String,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// Issue a signed token for the given admin.
pub fn issue_token(
    admin_id: i32,
    username: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = AuthenticatedAdmin {
        sub: admin_id,
        username: username.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token signature and expiry, returning the embedded claims.
pub fn verify_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedAdmin, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedAdmin>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

fn unauthorized(message: &str) -> actix_web::Error {
    let response = HttpResponse::Unauthorized().json(ApiResponse::<()>::error(message));
    InternalError::from_response(message.to_string(), response).into()
}

impl FromRequest for AuthenticatedAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(unauthorized("authentication is not configured")));
        };

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let result = match token {
            Some(token) => verify_token(token, &config.jwt_secret)
                .map_err(|_| unauthorized("invalid or expired token")),
            None => Err(unauthorized("missing bearer token")),
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let token = issue_token(7, "alice", SECRET).expect("token should be issued");
        let claims = verify_token(&token, SECRET).expect("token should verify");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = issue_token(7, "alice", SECRET).expect("token should be issued");

        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = AuthenticatedAdmin {
            sub: 7,
            username: "alice".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token should be issued");

        assert!(verify_token(&token, SECRET).is_err());
    }
}
