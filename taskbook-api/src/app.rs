//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use taskbook_api::{app::{build_router, AppState}, config::Config};
//! use taskbook_shared::store::MemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState::new(MemoryStore::new(), config)?;
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use taskbook_shared::{
    auth::{
        jwt::TokenIssuer,
        middleware::{require_auth, Authenticator},
        password::{Argon2Hasher, PasswordError, PasswordHashing},
    },
    services::{accounts::AccountService, tasks::TaskService},
    store::{Store, TaskStore, UserStore},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Everything
/// inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,

    pub tasks: TaskService,

    pub tokens: TokenIssuer,

    pub authenticator: Authenticator,

    /// The backend itself, for health checks
    pub store: Arc<dyn Store>,

    pub config: Arc<Config>,
}

impl AppState {
    /// Wires services around a store using the given configuration
    ///
    /// # Errors
    ///
    /// Fails if the configured password hashing cost is rejected.
    pub fn new<S>(store: S, config: Config) -> Result<Self, PasswordError>
    where
        S: Store + 'static,
    {
        let store = Arc::new(store);
        let hasher: Arc<dyn PasswordHashing> = Arc::new(Argon2Hasher::new(config.password)?);
        let tokens = TokenIssuer::hs256(&config.jwt.secret, config.token_ttl());

        let users: Arc<dyn UserStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store.clone();

        Ok(Self {
            accounts: AccountService::new(users.clone(), hasher),
            tasks: TaskService::new(tasks),
            authenticator: Authenticator::new(tokens.clone(), users),
            tokens,
            store,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                     # Banner (public)
/// ├── GET /health               # Health check (public)
/// └── /api/
///     ├── /users/               # Accounts (public)
///     │   ├── POST /register
///     │   └── POST /login
///     └── /tasks/               # Tasks (bearer token)
///         ├── GET    /
///         ├── POST   /
///         ├── GET    /:id
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Body size limit
/// 4. Authentication (task routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login));

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            require_auth,
        ));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
