use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_router::network::topology;
use metro_router::planner::QuietConfig;
use metro_router::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let topology_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "network-layout.json".to_string());
    let src = std::fs::read_to_string(&topology_path)
        .unwrap_or_else(|e| panic!("could not read topology file {topology_path}: {e}"));

    let load = topology::load_str(&src).expect("could not load network topology");
    if !load.travel_times_complete {
        tracing::warn!("travel times are missing or incomplete; affected edges default to 0");
    }
    info!(
        stations = load.network.station_count(),
        lines = load.network.line_count(),
        "network loaded"
    );

    let state = AppState::new(load.network, QuietConfig::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
