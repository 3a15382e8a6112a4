use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};
use workcheck::commands::Cli;
use workcheck::libs::messages::macros::is_debug_mode;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("workcheck=debug")))
            .init();
    }

    Cli::menu().await
}
