//! EOS GO remote entry point.
//!
//! Sends the GO key to an ETC Eos family lighting console as an OSC message
//! over UDP.  The console endpoint is stored in a small JSON file so it
//! survives restarts.
//!
//! # Usage
//!
//! ```text
//! eos-go [--config PATH] [COMMAND]
//!
//! Commands:
//!   console             Interactive session (default): Enter sends GO
//!   go                  Send GO once
//!   set <IP> <PORT>     Validate and store a new console endpoint
//!   show                Print the console endpoint in effect
//!   monitor [--bind A]  Log incoming OSC messages until Ctrl-C
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable        | Default     | Description                     |
//! |-----------------|-------------|---------------------------------|
//! | `EOS_GO_CONFIG` | `data.json` | Path of the endpoint file       |
//! | `RUST_LOG`      | `info`      | Log filter (written to stderr)  |

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use eos_go::application::session::SessionController;
use eos_go::infrastructure::network::control_client::UdpTransportFactory;
use eos_go::infrastructure::network::monitor::OscMonitor;
use eos_go::infrastructure::storage::config::{JsonConfigStore, DEFAULT_CONFIG_FILE};
use eos_go::infrastructure::ui_bridge::{self, console, CommandResult};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Press GO on an Eos console over OSC/UDP.
#[derive(Debug, Parser)]
#[command(name = "eos-go", version)]
struct Cli {
    /// Path of the JSON file holding the console endpoint.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, env = "EOS_GO_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive session: Enter sends GO, `set <ip> <port>` retargets.
    Console,
    /// Send GO once to the stored endpoint.
    Go,
    /// Validate and store a new console endpoint.
    Set {
        /// IPv4 or IPv6 address of the console.
        ip: String,
        /// OSC UDP port of the console (1-65535).
        port: String,
    },
    /// Print the console endpoint in effect (the default if none is stored).
    Show,
    /// Log incoming OSC messages until Ctrl-C.
    Monitor {
        /// Address to listen on.
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Console) {
        Command::Console => {
            let controller = start_session(&cli.config)?;
            let stdin = std::io::stdin();
            console::run_console(&controller, stdin.lock(), std::io::stdout())
                .context("console I/O failed")
        }
        Command::Go => report(ui_bridge::send_go(&start_session(&cli.config)?)),
        Command::Set { ip, port } => report(ui_bridge::update_endpoint(
            &start_session(&cli.config)?,
            &ip,
            &port,
        )),
        Command::Show => report(ui_bridge::get_endpoint(&start_session(&cli.config)?)),
        Command::Monitor { bind } => run_monitor(bind),
    }
}

fn start_session(config: &Path) -> anyhow::Result<SessionController> {
    SessionController::start(
        Box::new(JsonConfigStore::new(config)),
        Box::new(UdpTransportFactory),
    )
    .context("failed to start session")
}

/// Prints the outcome and turns failure into a non-zero exit.
fn report<T: serde::Serialize>(result: CommandResult<T>) -> anyhow::Result<()> {
    if !result.success {
        bail!(result.message);
    }
    println!("{}", result.message);
    Ok(())
}

fn run_monitor(bind: SocketAddr) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let monitor = OscMonitor::bind(bind).await?;
        info!("OSC monitor listening on {}. Press Ctrl-C to exit.", monitor.local_addr()?);
        monitor
            .run(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("shutdown signal received");
                }
            })
            .await?;
        Ok::<(), anyhow::Error>(())
    })
}
