pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get_service, Router};
use database::PgDatabase;
use eta::ReportParameters;
use log::info;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracking::{client::Client, position::VehiclePositionSource};

pub mod api;
pub mod common;
pub mod hateoas;
pub mod middleware;

pub const LISTEN_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub tracking_client: Client<PgDatabase>,
    pub eta: EtaState,
}

/// Report settings shared by all eta requests.
#[derive(Clone)]
pub struct EtaState {
    pub parameters: Arc<ReportParameters>,
    pub position: Arc<dyn VehiclePositionSource>,
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router());

    let listener = TcpListener::bind(LISTEN_ADDRESS).await?;
    info!("listening on {}", LISTEN_ADDRESS);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router() -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new("./resources/www/")
                .not_found_service(ServeFile::new("./resources/www/error404.html")),
        ),
    )
}
