use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadroute_cli::output::OutputFormat;
use roadroute_lib::config::{DEFAULT_READ_TIMEOUT_SECS, DEFAULT_RESPONSE_DELAY_SECS};
use roadroute_lib::{load_road_network, TransportConfig};

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Least-cost routes over a road network")]
struct Cli {
    /// Road network description file (`V,id,lat,lon` and `E,tail,head` lines).
    #[arg(
        long,
        env = "ROADROUTE_NETWORK",
        default_value = "edmonton-roads-2.0.1.txt",
        global = true
    )]
    network: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer one request on stdin, acknowledging each waypoint with `A`.
    Batch,
    /// Serve the handshake protocol to TCP clients, one at a time.
    Serve(ServeArgs),
    /// Plan a single route and print it.
    Route(RouteArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "ROADROUTE_LISTEN", default_value = "127.0.0.1:9600")]
    listen: SocketAddr,

    /// Seconds to wait for each line before resetting the session (at least 1).
    #[arg(
        long,
        env = "ROADROUTE_READ_TIMEOUT_SECS",
        default_value_t = DEFAULT_READ_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    read_timeout_secs: u64,

    /// Seconds to pause before sending a computed route.
    #[arg(long, env = "ROADROUTE_RESPONSE_DELAY_SECS", default_value_t = DEFAULT_RESPONSE_DELAY_SECS)]
    response_delay_secs: u64,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Start latitude in 100000-ths of a degree.
    #[arg(long, allow_negative_numbers = true)]
    from_lat: i64,
    /// Start longitude in 100000-ths of a degree.
    #[arg(long, allow_negative_numbers = true)]
    from_lon: i64,
    /// Destination latitude in 100000-ths of a degree.
    #[arg(long, allow_negative_numbers = true)]
    to_lat: i64,
    /// Destination longitude in 100000-ths of a degree.
    #[arg(long, allow_negative_numbers = true)]
    to_lon: i64,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let network = load_road_network(&cli.network)
        .with_context(|| format!("failed to load road network from {}", cli.network.display()))?;

    match cli.command {
        Command::Batch => commands::batch::handle_batch(&network),
        Command::Serve(args) => {
            let config =
                TransportConfig::from_secs(args.read_timeout_secs, args.response_delay_secs);
            commands::serve::handle_serve(&network, args.listen, config)
        }
        Command::Route(args) => commands::route::handle_route(
            &network,
            &RouteCommandArgs {
                from: (args.from_lat, args.from_lon),
                to: (args.to_lat, args.to_lon),
                format: args.format,
            },
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Stdout carries protocol lines, so logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
