//! linechat terminal client.
//!
//! # Usage
//!
//! ```bash
//! linechat --host chat.example --port 7000 --user alice
//! ```

use clap::Parser;
use linechat_client::{ConnectionSession, SessionConfig};
use linechat_tui::{Args, EventLoop, TerminalDriver, logging};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;
    logging::init(&config.log_file, &config.log_level)?;

    tracing::info!(addr = %config.addr, user = %config.profile.user, "connecting");
    let stream = TcpStream::connect(&config.addr).await?;
    stream.set_nodelay(true)?;
    tracing::info!("connected");

    let session = ConnectionSession::new(stream, SessionConfig::default());
    let driver = TerminalDriver::new()?;
    EventLoop::new(driver, session, config.profile).run().await?;

    Ok(())
}
