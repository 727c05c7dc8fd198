use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::access_log::AccessLog;

/// Binds the configured address and serves until the process exits.
pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
///
/// With `max_connections` set, accepting pauses while that many connections
/// are in flight. Without it the number of tasks is unbounded.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    let access_log = Arc::new(AccessLog::new(cfg.log_file.clone()));
    let limiter = cfg.max_connections.map(|n| Arc::new(Semaphore::new(n)));

    info!(
        root = %cfg.root.display(),
        max_connections = ?cfg.max_connections,
        request_log = ?access_log.path(),
        "Serving files"
    );

    loop {
        let permit = match &limiter {
            Some(sem) => Some(sem.clone().acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let config = cfg.clone();
        let access_log = access_log.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let conn = Connection::new(socket, config, access_log);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
