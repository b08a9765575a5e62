mod cli;
pub mod api;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::commands::{open_store, run_cli};
use cli::opts::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    match &args.cmd {
        // The API gets its own runtime; everything else stays synchronous
        Command::Api(api) => {
            let store = open_store(args.data_dir.clone())?;
            let addr: std::net::SocketAddr = api.addr.parse()?;
            let rt = Runtime::new()?;
            rt.block_on(api::server::run(store, addr))
        }
        _ => run_cli(args),
    }
}
