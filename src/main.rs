//! Binary entry point: allocator, logging, CLI dispatch.

use clap::Parser;
use sat_classics::command_line::cli::{self, Cli};

/// Global allocator using `tikv-jemallocator` for performance and memory
/// usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
