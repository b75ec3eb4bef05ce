//! Serve command handler: the streaming handshake protocol over TCP.

use std::net::{SocketAddr, TcpListener};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use roadroute_lib::{
    Error as RouteError, LinkChannel, RoadNetwork, StreamingEngine, TransportConfig,
};

/// Accept clients on `listen` one at a time, running the streaming engine
/// for each until it disconnects. Connection failures are logged and the
/// next client is accepted; any other engine error is fatal.
pub fn handle_serve(
    network: &RoadNetwork,
    listen: SocketAddr,
    config: TransportConfig,
) -> Result<()> {
    let listener =
        TcpListener::bind(listen).with_context(|| format!("failed to listen on {listen}"))?;
    info!(
        address = %listener.local_addr()?,
        read_timeout_ms = config.read_timeout.as_millis() as u64,
        response_delay_ms = config.response_delay.as_millis() as u64,
        "waiting for route clients"
    );

    let engine = StreamingEngine::new(network, config);
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "failed to accept connection");
                continue;
            }
        };
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        let span = info_span!("client", %peer);
        let _guard = span.enter();

        let mut channel = match LinkChannel::from_tcp(stream, config.read_timeout) {
            Ok(channel) => channel,
            Err(err) => {
                warn!(error = %err, "failed to configure client socket");
                continue;
            }
        };
        match engine.run(&mut channel) {
            Ok(answered) => info!(answered, "client disconnected"),
            Err(RouteError::Io(err)) => warn!(error = %err, "client connection failed"),
            Err(err) => return Err(err).context("route engine failed"),
        }
    }

    Ok(())
}
