use anyhow::Result;
use clap::Parser;

use commentron::app::{Commentron, run_app};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Commentron::parse();
    run_app(cli).await
}
