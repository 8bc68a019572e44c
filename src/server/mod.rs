mod extract;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::api::API;
use crate::error::Error;
use crate::server::handlers::{auth, favorites, restaurants, stats};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI) -> Router {
    let routes = Router::new()
        .route("/", get(root))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/restaurants", get(restaurants::search))
        .route("/restaurants/search", get(restaurants::search))
        .route("/restaurants/:id", get(restaurants::find))
        .route("/restaurants/:id/prices", get(restaurants::prices))
        .route("/prices", get(restaurants::batch_prices))
        .route("/favorites", get(favorites::list))
        .route(
            "/favorites/:id",
            post(favorites::add)
                .put(favorites::set)
                .delete(favorites::remove),
        )
        .route("/user/stats", get(stats::mine))
        .route("/users/:id/stats", get(stats::find));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes)
        .layer(cors)
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "server error");
            crate::error::unexpected_error()
        })
}

async fn root() -> Json<Value> {
    json!({ "message": "Food Delivery Price Comparison API" }).into()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }

    tracing::info!("received Ctrl+C, shutting down");
}

#[test]
fn restaurant_search_routes_test() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio_test::block_on;
    use tower_service::Service;

    block_on(async {
        let mut app = router(Arc::new(crate::engine::lazy_engine(None)) as DynAPI);

        let cases = [
            ("/api/restaurants/search?q=king", StatusCode::OK),
            ("/api/restaurants/search", StatusCode::OK),
            ("/api/restaurants?cuisine=pizza", StatusCode::OK),
            ("/api/restaurants/3", StatusCode::OK),
            ("/api/restaurants/99", StatusCode::NOT_FOUND),
        ];

        for (uri, status) in cases {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.call(request).await.unwrap();

            assert_eq!(response.status(), status, "{}", uri);
        }
    });
}
