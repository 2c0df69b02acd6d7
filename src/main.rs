use cognidb::frontend::start_all;
use cognidb::logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;
    info!("CogniDB is starting...");

    start_all().await?;

    Ok(())
}
