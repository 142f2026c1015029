//! # mostrador-backend: Data Service Layer for Mostrador POS
//!
//! Persistence, authentication and querying all live in a hosted data
//! service. This crate describes that service as four narrow async
//! contracts and ships an in-memory implementation of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mostrador POS Data Flow                          │
//! │                                                                         │
//! │  register command (finalize_sale)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  mostrador-backend (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Contracts   │    │  InMemoryBackend │   │    Seed     │  │   │
//! │  │   │  (service/)   │◄───│    (memory/)     │◄──│  (seed.rs)  │  │   │
//! │  │   │               │    │                  │   │             │  │   │
//! │  │   │ CatalogService│    │ RwLock tables    │   │ demo()      │  │   │
//! │  │   │ SaleService   │    │ fault injection  │   │             │  │   │
//! │  │   │ ...           │    │ ticket numbers   │   │             │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - The four service contracts
//! - [`memory`] - `InMemoryBackend`
//! - [`seed`] - Demo catalog, promotions and user
//! - [`error`] - Backend error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mostrador_backend::{seed, CatalogService};
//!
//! let backend = seed::demo();
//! let entries = backend.search("dino").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod seed;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BackendError, BackendResult};
pub use memory::{InMemoryBackend, Operation};
pub use service::{
    AuthEvent, CatalogService, IdentityService, PromotionService, SaleDetail, SaleService,
    Session, User,
};
