use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::{Connection, ServerContext};

pub async fn run(cfg: &Config, ctx: Arc<ServerContext>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, ctx).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, ctx: Arc<ServerContext>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let local_addr = socket.local_addr().ok();
        let ctx = ctx.clone();
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, ctx, local_addr);
                if let Err(e) = conn.run().await {
                    tracing::warn!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
