use clap::Parser;
use skillrun_cli::Cli;

/// Exit codes: 0 success, 2 skill not found, 3 input resolution failure,
/// 4 backend failure, 1 anything else.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        eprintln!("❌ Error: {e}");
        std::process::exit(e.exit_code());
    }
}
