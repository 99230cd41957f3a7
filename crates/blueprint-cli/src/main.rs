//! Blueprint CLI - Turn signature declarations into class diagrams

mod cli;

use clap::Parser;

fn main() {
    // Logging is initialized by the app from the CLI flags and environment
    let cli_args = cli::Cli::parse();

    let app = cli::BlueprintApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
