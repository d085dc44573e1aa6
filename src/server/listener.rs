use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;

const LISTEN_BACKLOG: u32 = 1024;

/// Binds a listener with SO_REUSEADDR set, so restarts do not fail on
/// "address in use".
pub fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid listen address: {addr}"))?;

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;

    Ok(socket.listen(LISTEN_BACKLOG)?)
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = bind(&cfg.listen_addr)?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Accept loop: one spawned task per connection, capped by a semaphore.
///
/// The permit is taken before `accept`, so a server at `max_connections`
/// stops accepting until a worker finishes. Worker failures are logged and
/// never reach the loop; an `accept` failure is fatal.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    let limiter = Arc::new(Semaphore::new(cfg.max_connections));

    loop {
        let permit = limiter
            .clone()
            .acquire_owned()
            .await
            .context("connection limiter closed")?;

        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let cfg = cfg.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, cfg);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
