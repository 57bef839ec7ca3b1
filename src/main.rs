//! CLI entry point for steamscore.

use anyhow::Result;

mod app;
mod app_config;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
