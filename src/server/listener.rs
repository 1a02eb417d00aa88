use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::handlers::Service;
use crate::http::connection::Connection;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    match cfg.serving_directory() {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => warn!("No serving directory configured, /files/ routes are disabled"),
    }

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
///
/// A failing connection is logged and never stops the loop.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    let service = Arc::new(Service::new(&cfg));

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let service = Arc::clone(&service);
        let cfg = Arc::clone(&cfg);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, service, &cfg);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
