use clap::Parser;
use oapi_lambda_router::cli::{run_cli, Cli};
use oapi_lambda_router::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("warning: {err:#}");
    }

    if let Err(err) = run_cli(cli) {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
