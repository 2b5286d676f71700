use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;

/// Claims minted by the external identity provider. This service never
/// issues tokens; it only verifies them and trusts the role claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Role,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Unauthorized("Malformed subject claim".to_string()))
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": { "code": "UNAUTHORIZED", "message": message }
        })),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "success": false,
            "error": {
                "code": "UNAUTHORIZED_ACCESS",
                "message": "Your role does not permit this action"
            }
        })),
    )
        .into_response()
}

pub fn decode_token(token: &str, secret: &[u8]) -> std::result::Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
}

fn bearer_claims(req: &Request) -> std::result::Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("Missing authorization header"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("Malformed authorization header"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("Unsupported authorization scheme"));
    };

    let config = crate::config::get_config();
    decode_token(token, config.jwt_secret.as_bytes())
        .map_err(|_| unauthorized("Invalid or expired token"))
}

pub async fn require_auth(mut req: Request, next: Next) -> Response {
    match bearer_claims(&req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

pub async fn require_candidate(mut req: Request, next: Next) -> Response {
    match bearer_claims(&req) {
        Ok(claims) if claims.role == Role::Candidate => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Ok(_) => forbidden(),
        Err(resp) => resp,
    }
}

pub async fn require_recruiter(mut req: Request, next: Next) -> Response {
    match bearer_claims(&req) {
        Ok(claims) if claims.role == Role::Recruiter => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Ok(_) => forbidden(),
        Err(resp) => resp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(role: Role, secret: &[u8]) -> String {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            role,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn decode_round_trip_preserves_role() {
        let token = token_for(Role::Recruiter, b"secret");
        let claims = decode_token(&token, b"secret").expect("decode");
        assert_eq!(claims.role, Role::Recruiter);
        assert!(claims.user_id().is_ok());
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let token = token_for(Role::Candidate, b"secret");
        assert!(decode_token(&token, b"other-secret").is_err());
    }

    #[test]
    fn malformed_subject_is_rejected() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: 0,
            role: Role::Candidate,
        };
        assert!(claims.user_id().is_err());
    }
}
