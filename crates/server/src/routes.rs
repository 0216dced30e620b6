pub mod products;

use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Envelope, Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub const PRODUCTS_BASE: &str = "/api/productcatalog";
pub const DOCS_PATH: &str = "/api-docs";

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)))
}

async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::failure("Route not found")))
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        // 未注册的方法与未知路由一样回 404 envelope，而不是 405
        .route("/", get(products::list).post(products::create).fallback(not_found))
        .route("/:id", put(products::update).delete(products::delete).fallback(not_found))
}

/// Build the full application router: health, product CRUD and the API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let swagger = SwaggerUi::new(DOCS_PATH).url(format!("{DOCS_PATH}/openapi.json"), ApiDoc::openapi());

    Router::new()
        .route("/health", get(health))
        .nest(PRODUCTS_BASE, product_routes())
        .with_state(state)
        .merge(swagger)
        .fallback(not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx 以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
