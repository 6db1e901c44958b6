use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{auth::token::TokenKeys, error::AppError};

/// Identity of the caller, attached by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

/// Extracts the token from an `Authorization` header value. The `Bearer `
/// prefix is optional.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then_some(token)
}

pub async fn require_auth(
    State(tokens): State<Arc<TokenKeys>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized("missing token"))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid token"))?;

    let token = bearer_token(header).ok_or(AppError::Unauthorized("missing token"))?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AppError::Unauthorized("invalid token")
    })?;

    if claims.user_id <= 0 {
        return Err(AppError::Unauthorized("invalid token"));
    }

    req.extensions_mut().insert(CurrentUser { id: claims.user_id });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Claims;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    const SECRET: &str = "guard-secret";

    fn app() -> Router {
        let tokens = Arc::new(TokenKeys::new(SECRET));
        Router::new()
            .route(
                "/whoami",
                get(|Extension(user): Extension<CurrentUser>| async move { user.id.to_string() }),
            )
            .route_layer(middleware::from_fn_with_state(tokens, require_auth))
    }

    fn token_for(user_id: i64, exp_offset: i64) -> String {
        TokenKeys::new(SECRET)
            .sign(&Claims {
                user_id,
                name: "John".into(),
                exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            })
            .unwrap()
    }

    async fn call(auth: Option<String>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token(""), None);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_user_id() {
        let (status, body) = call(Some(format!("Bearer {}", token_for(42, 3600)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_prefix_is_optional() {
        let (status, body) = call(Some(token_for(42, 3600))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"missing token"}"#);
    }

    #[tokio::test]
    async fn test_rejected_tokens() {
        let foreign = TokenKeys::new("other-secret")
            .sign(&Claims {
                user_id: 42,
                name: "John".into(),
                exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            })
            .unwrap();

        for auth in [
            "Bearer not.a.token".to_string(),
            format!("Bearer {}", token_for(42, -10)),
            format!("Bearer {foreign}"),
            format!("Bearer {}", token_for(0, 3600)),
        ] {
            let (status, body) = call(Some(auth)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, r#"{"error":"invalid token"}"#);
        }
    }
}
