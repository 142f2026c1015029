//! # Service Contracts
//!
//! The four collaborators the register talks to.
//!
//! ## Contract Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service Contracts                                    │
//! │                                                                         │
//! │  register command                                                      │
//! │       │                                                                 │
//! │       │  services.sales.record_sale(customer_id, &priced, promo)       │
//! │       ▼                                                                 │
//! │  Arc<dyn SaleService>                                                  │
//! │       │                                                                 │
//! │       ├── InMemoryBackend (tests, demo binary)                         │
//! │       └── any hosted data service client                               │
//! │                                                                         │
//! │  Every method is async and returns BackendResult<T>.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Contracts
//!
//! - [`CatalogService`] - Catalog browsing and product maintenance
//! - [`PromotionService`] - Promotion listing and maintenance
//! - [`SaleService`] - Customers, sales and daily reports
//! - [`IdentityService`] - Sign-in and auth change events

pub mod catalog;
pub mod identity;
pub mod promotion;
pub mod sale;

pub use catalog::CatalogService;
pub use identity::{AuthEvent, IdentityService, Session, User};
pub use promotion::PromotionService;
pub use sale::{SaleDetail, SaleService};
