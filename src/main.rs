use anyhow::Result;
use chlog::cli::Cli;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli.execute()
}
