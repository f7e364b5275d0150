use axum::{
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::config;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, super_admin_middleware};
use crate::state::AppState;

/// Full HTTP surface. Route groups are merged so that one path can carry
/// methods from different tiers (GET /api/departments is public, POST is not).
pub fn app(state: AppState) -> Router {
    let security = &config().security;
    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .merge(elevated_routes(&state));

    if config().server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if security.enable_cors {
        router = router.layer(cors_layer(&security.cors_origins));
    }

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, catalog, employees, system};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/auth/login", post(auth::login))
        // Employee self-service
        .route("/api/users", post(employees::register))
        .route("/api/documents", post(employees::submit_document))
        .route("/api/documents/user/:user_id", get(employees::user_documents))
        // Reference data
        .route("/api/departments", get(catalog::departments))
        .route("/api/departments/locations", get(catalog::locations))
        .route("/api/departments/structure", get(catalog::structure))
        .route("/api/departments/by-location/:location", get(catalog::departments_by_location))
        .route("/api/document-types/active", get(catalog::active_document_types))
        .route("/api/news/public", get(catalog::public_news))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{auth, document_types, documents, employees, news};

    Router::new()
        .route("/api/auth/me", get(auth::me))
        // Employees
        .route("/api/admin/employees", get(employees::list).post(employees::create))
        .route("/api/admin/employees/pending", get(employees::pending))
        .route("/api/admin/employees/search", get(employees::search))
        .route(
            "/api/admin/employees/:id",
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .route("/api/admin/employees/:id/approve", post(employees::approve))
        .route("/api/admin/employees/:id/reject", axum::routing::delete(employees::reject))
        .route("/api/admin/employees/:id/documents", get(employees::documents))
        .route("/api/admin/dashboard/stats", get(employees::dashboard))
        // Document requests
        .route("/api/admin/documents", get(documents::list))
        .route("/api/admin/documents/stats", get(documents::stats))
        .route("/api/admin/documents/search", get(documents::search))
        .route("/api/admin/documents/status/:status", get(documents::by_status))
        .route("/api/admin/documents/type/:document_type", get(documents::by_type))
        .route("/api/admin/documents/:id", get(documents::get).delete(documents::delete))
        .route("/api/admin/documents/:id/status", put(documents::update_status))
        // Document types
        .route(
            "/api/admin/document-types",
            get(document_types::list).post(document_types::create),
        )
        .route(
            "/api/admin/document-types/:id",
            get(document_types::get)
                .put(document_types::update)
                .delete(document_types::delete),
        )
        .route("/api/admin/document-types/:id/toggle-status", put(document_types::toggle_status))
        // News
        .route("/api/news", get(news::list).post(news::create))
        .route("/api/news/:id", get(news::get).put(news::update).delete(news::delete))
        .route("/api/news/:id/publish", post(news::publish))
        .route("/api/news/:id/archive", post(news::archive))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

fn elevated_routes(state: &AppState) -> Router<AppState> {
    use elevated::{admins, departments};

    Router::new()
        .route("/api/departments", post(departments::create))
        .route("/api/departments/:id", put(departments::update).delete(departments::delete))
        .route("/api/superadmin/admins", get(admins::list).post(admins::create))
        .route("/api/superadmin/admins/:id", get(admins::get).delete(admins::deactivate))
        .route("/api/superadmin/superadmins", post(admins::create_super_admin))
        .route("/api/superadmin/stats", get(admins::stats))
        // Outer layer runs first: authenticate, then check the role.
        .route_layer(from_fn(super_admin_middleware))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}
