//! # State Module
//!
//! Register state, split by concern so each command takes only what it
//! touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  SaleState   │  │ SessionState │  │ ConfigState  │  │  Services  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Arc<Mutex<  │  │  Arc<RwLock< │  │  store       │  │  catalog   │  │
//! │  │   SaleDraft  │  │   Option<    │  │  currency    │  │  promotions│  │
//! │  │  >>          │  │   Session>>> │  │  cart limits │  │  sales     │  │
//! │  │              │  │              │  │              │  │  identity  │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SaleState: std Mutex, never held across .await                      │
//! │  • SessionState: tokio RwLock, fed by the auth event task              │
//! │  • ConfigState: read-only after loading                                │
//! │  • Services: Arc<dyn Trait>, implementations are Send + Sync           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod sale;
mod services;
mod session;

pub use config::{CartConfig, ConfigError, ConfigResult, ConfigState, CurrencyConfig, StoreConfig};
pub use sale::{SaleDraft, SaleState};
pub use services::Services;
pub use session::SessionState;
