use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    auth::{require_auth, PasswordHasher, TokenKeys},
    handlers::{auth, subscription},
    repository::{SubscriptionRepository, UserRepository},
    services::{AuthService, SubscriptionService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub subscriptions: SubscriptionService,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: SqlitePool, hasher: PasswordHasher, tokens: TokenKeys) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            auth: AuthService::new(UserRepository::new(db.clone()), hasher, tokens.clone()),
            subscriptions: SubscriptionService::new(SubscriptionRepository::new(db)),
            tokens,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let guard = middleware::from_fn_with_state(state.tokens.clone(), require_auth);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout).route_layer(guard.clone()));

    let api_routes = Router::new()
        .route(
            "/subscriptions",
            get(subscription::list_subscriptions).post(subscription::create_subscription),
        )
        .route(
            "/subscriptions/:id",
            get(subscription::get_subscription).delete(subscription::delete_subscription),
        )
        .route_layer(guard);

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
