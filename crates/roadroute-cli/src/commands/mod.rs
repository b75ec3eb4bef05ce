// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// loads the road network once and dispatches to these handlers.

pub mod batch;
pub mod route;
pub mod serve;
