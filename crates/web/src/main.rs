use std::sync::Arc;

use database::{DatabaseConnectionInfo, PgDatabase};
use log::{info, warn};
use tracking::{config::EtaConfig, server::Server};
use web::{start_web_server, EtaState, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // configuration
    let config = EtaConfig::load().expect("could not load eta configuration.");
    info!(
        "reporting on route {}, snapping stops onto route {}",
        config.report.reporting_route, config.report.snapping_route
    );

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // server
    let server = Server::new(database.clone());
    if let Some(seed) = config.vehicle_seed.as_ref() {
        if let Err(why) = server.seed_vehicles(seed).await {
            warn!("could not seed vehicles from {}: {}", seed.display(), why);
        }
    }

    // web server
    let web_future = start_web_server(WebState {
        tracking_client: server.client("REST API"),
        eta: EtaState {
            parameters: Arc::new(config.report),
            position: config.vehicle.source(),
        },
    });

    if let Err(why) = web_future.await {
        warn!("web server stopped: {}", why);
    }
}
