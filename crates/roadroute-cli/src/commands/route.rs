//! Route command handler for answering a single query from the command line.

use std::io;

use anyhow::{Context, Result};

use roadroute_lib::{plan_route, RoadNetwork, RouteQuery};
use roadroute_cli::output::{render_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Start point in 100000-ths of a degree.
    pub from: (i64, i64),
    /// Destination point in 100000-ths of a degree.
    pub to: (i64, i64),
    pub format: OutputFormat,
}

pub fn handle_route(network: &RoadNetwork, args: &RouteCommandArgs) -> Result<()> {
    let query = RouteQuery::new(args.from.0, args.from.1, args.to.0, args.to.1);
    let plan = plan_route(network, &query).context("failed to plan route")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_route(&mut out, &query, &plan, args.format)
}
