//! `calorie` executable entry point.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = calorie_cli::Cli::parse();
    let stdout = std::io::stdout();
    calorie_cli::run(cli, &mut stdout.lock())
}
