use clap::Parser;
use tracing::info;

use bricklook::api::ApiClient;
use bricklook::cli::Args;
use bricklook::logging::init_logging;
use bricklook::tui;

fn main() {
    let args = Args::parse();

    let _guard = match init_logging(args.log_stdout, &args.log_file, args.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:?}");
            std::process::exit(1);
        }
    };

    info!(api = %args.api, "Starting bricklook");

    let client = match ApiClient::new(&args.api) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e:?}");
            std::process::exit(1);
        }
    };

    if let Err(e) = tui::run_tui(client) {
        eprintln!("Failed to run TUI: {e:?}");
        std::process::exit(1);
    }
}
