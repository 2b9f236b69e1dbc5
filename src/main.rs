//! minircd entry point.

use minircd::{Server, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_args(std::env::args().skip(1)).map_err(|err| {
        error!(error = %err, "invalid invocation");
        err
    })?;

    info!(port = config.port, server = %config.server_name, "starting minircd");
    let mut server = Server::bind(config)?;
    server.run()?;
    info!("clean shutdown");
    Ok(())
}
