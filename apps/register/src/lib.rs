//! # Mostrador Register Library
//!
//! The point-of-sale shell: state, commands and the line-oriented driver
//! used by the `register` binary.
//!
//! ## Module Organization
//! ```text
//! register/
//! ├── lib.rs          ◄─── You are here (logging & run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── sale.rs     ◄─── Current sale (cart + customer)
//! │   ├── session.rs  ◄─── Signed-in session
//! │   ├── services.rs ◄─── Data service handles
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart, promotion, customer
//! │   ├── sale.rs     ◄─── finalize_sale, get_sale
//! │   ├── catalog.rs  ◄─── Catalog browsing and maintenance
//! │   ├── promotions.rs
//! │   ├── auth.rs
//! │   └── report.rs
//! ├── shell.rs        ◄─── Line protocol
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register Startup                                  │
//! │                                                                         │
//! │  1. Initialize Logging ────────────────────────────────────────────────►│
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,mostrador=debug,register=debug via RUST_LOG         │
//! │                                                                         │
//! │  2. Load Configuration ────────────────────────────────────────────────►│
//! │     • defaults → register.toml → MOSTRADOR_* environment                │
//! │                                                                         │
//! │  3. Connect Data Services ─────────────────────────────────────────────►│
//! │     • Demo in-memory backend with seed catalog                          │
//! │                                                                         │
//! │  4. Read stdin, one command per line, until quit or EOF                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::sync::Arc;

use mostrador_backend::seed;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use shell::{Register, Request};
use state::{ConfigState, Services};

/// Runs the register against the demo backend until `quit` or end of input.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Mostrador register");

    let config = ConfigState::load_or_default(None);
    info!(store = %config.store.name, currency = %config.currency.code, "Configuration loaded");

    let backend = Arc::new(seed::demo());
    let register = Register::new(config, Services::from_backend(backend));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.parse::<Request>(), Ok(Request::Quit)) {
            break;
        }

        let command = line.split_whitespace().next().unwrap_or_default();
        debug!(command = %command, "Shell request");
        let reply = register.reply(line).await;
        stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Register closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mostrador_backend=trace` - Trace for the data services only
/// - Default: `info,mostrador=debug,register=debug`
///
/// Logs go to stderr so stdout carries only replies.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mostrador=debug,register=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
