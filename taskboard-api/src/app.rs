/// Application state and router builder
///
/// # Middleware Stack
///
/// Outermost to innermost: request-id (set + propagate), request tracing,
/// panic recovery, CORS, then bearer authentication on the protected route
/// group only. A rejected credential therefore short-circuits before any
/// handler runs, but still carries a request id and a trace span.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use taskboard_shared::auth::{jwt::TokenManager, middleware::require_auth};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, routes};

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; everything inside is
/// either a pool or behind an `Arc`, so cloning is cheap. The pool is the
/// only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Token manager shared with the auth middleware
    pub tokens: Arc<TokenManager>,
}

impl AppState {
    /// Creates application state, deriving the token manager from config
    pub fn new(db: PgPool, config: Config) -> Self {
        let tokens = Arc::new(TokenManager::new(
            config.jwt.secret.clone(),
            chrono::Duration::seconds(config.jwt.access_ttl_secs),
            chrono::Duration::seconds(config.jwt.refresh_ttl_secs),
        ));

        Self {
            db,
            config: Arc::new(config),
            tokens,
        }
    }
}

/// Builds the complete Axum router
///
/// ```text
/// /health                                  # public
/// /api/v1/auth/sign-up|sign-in|refresh     # public
/// /api/v1/auth/logout                      # protected
/// /api/v1/users/...                        # protected
/// /api/v1/boards|categories|tasks/...      # protected (private hierarchy)
/// /api/v1/projects/...                     # protected (shared hierarchy)
/// ```
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/sign-up", post(routes::auth::sign_up))
        .route("/auth/sign-in", post(routes::auth::sign_in))
        .route("/auth/refresh", post(routes::auth::refresh));

    let users = Router::new()
        .route("/auth/logout", post(routes::auth::logout))
        .route("/users", get(routes::users::list_users))
        .route(
            "/users/me",
            get(routes::users::me)
                .put(routes::users::update_me)
                .delete(routes::users::delete_me),
        );

    let private = Router::new()
        .route(
            "/boards",
            post(routes::private::create_board).get(routes::private::list_boards),
        )
        .route(
            "/boards/:id",
            put(routes::private::update_board).delete(routes::private::delete_board),
        )
        .route("/boards/:id/categories", get(routes::private::list_categories))
        .route("/boards/:id/tasks", get(routes::private::list_board_tasks))
        .route("/categories", post(routes::private::create_category))
        .route(
            "/categories/:id",
            put(routes::private::update_category).delete(routes::private::delete_category),
        )
        .route(
            "/categories/:id/tasks",
            get(routes::private::list_category_tasks),
        )
        .route(
            "/tasks",
            post(routes::private::create_task).get(routes::private::list_tasks),
        )
        .route(
            "/tasks/:id",
            get(routes::private::get_task)
                .put(routes::private::update_task)
                .delete(routes::private::delete_task),
        );

    let projects = Router::new()
        .route(
            "/projects",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route("/projects/memberships", get(routes::projects::list_memberships))
        .route(
            "/projects/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/projects/:id/members",
            post(routes::projects::add_member).get(routes::projects::list_members),
        )
        .route(
            "/projects/:id/members/:user_id",
            put(routes::projects::update_member).delete(routes::projects::remove_member),
        )
        .route(
            "/projects/:id/boards",
            post(routes::projects::create_board).get(routes::projects::list_boards),
        )
        .route(
            "/projects/:id/boards/:board_id",
            put(routes::projects::update_board).delete(routes::projects::delete_board),
        )
        .route(
            "/projects/:id/boards/:board_id/categories",
            post(routes::projects::create_category).get(routes::projects::list_categories),
        )
        .route(
            "/projects/:id/categories/:category_id",
            put(routes::projects::update_category).delete(routes::projects::delete_category),
        )
        .route(
            "/projects/:id/categories/:category_id/tasks",
            get(routes::projects::list_category_tasks),
        )
        .route(
            "/projects/:id/boards/:board_id/tasks",
            post(routes::projects::create_task).get(routes::projects::list_board_tasks),
        )
        .route("/projects/:id/tasks", get(routes::projects::list_tasks))
        .route(
            "/projects/:id/tasks/:task_id",
            get(routes::projects::get_task)
                .put(routes::projects::update_task)
                .delete(routes::projects::delete_task),
        );

    let protected = users
        .merge(private)
        .merge(projects)
        .layer(middleware::from_fn(require_auth(state.tokens.clone())));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", public.merge(protected))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

// Route handlers live in `routes`; integration coverage for the composed
// router is in tests/router_test.rs.
