//! Batch command handler: one request over stdin/stdout.

use std::io;

use anyhow::{Context, Result};

use roadroute_lib::{run_batch, BatchChannel, RoadNetwork};

/// Answer a single request read from stdin, writing the response to stdout.
pub fn handle_batch(network: &RoadNetwork) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut channel = BatchChannel::new(stdin.lock(), stdout.lock());

    run_batch(network, &mut channel).context("batch request failed")?;
    Ok(())
}
