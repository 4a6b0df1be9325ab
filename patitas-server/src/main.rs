use patitas_server::{Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment: dotenv, work directory, logging
    let config = setup_environment()?;

    print_banner();
    tracing::info!("Patitas server starting...");

    // Server::run initializes state and spawns the sync worker
    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
