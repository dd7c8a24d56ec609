//! mcp-factory stdio server binary.
//!
//! Speaks newline-delimited JSON-RPC on stdin/stdout; all logging goes to
//! stderr so it never corrupts the protocol stream.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` — Log filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use mcp_factory::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    McpServer::new().serve().await?;
    Ok(())
}
