use clap::Parser;
use dotenv::dotenv;
use tgcast::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tgcast::run(cli).await
}
