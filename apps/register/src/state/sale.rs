//! # Sale State
//!
//! Holds the sale currently being rung up: the cart and the customer.
//!
//! ## Thread Safety
//! The draft lives in `Arc<Mutex<T>>`. The lock is only ever taken inside
//! the `with_*` closures, so it is never held across an `.await`.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale State Operations                                │
//! │                                                                         │
//! │  Register Action          Command                 State Change          │
//! │  ───────────────          ───────                 ────────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_to_cart() ───────► cart = cart.apply(e) │
//! │                                                                         │
//! │  Pick promotion ─────────► set_promotion() ─────► cart = cart.apply(e) │
//! │                                                                         │
//! │  Type customer ──────────► set_customer() ──────► customer = details   │
//! │                                                                         │
//! │  Finalize OK ────────────► finalize_sale() ─────► reset()              │
//! │                                                                         │
//! │  Finalize fails ─────────► finalize_sale() ─────► (untouched)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use mostrador_core::{Cart, CartEvent, CustomerDetails};
use serde::Serialize;

/// The in-progress sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub cart: Cart,
    pub customer: CustomerDetails,
    /// When the draft was created or last reset.
    pub started_at: DateTime<Utc>,
}

impl SaleDraft {
    pub fn new() -> Self {
        SaleDraft {
            cart: Cart::new(),
            customer: CustomerDetails::default(),
            started_at: Utc::now(),
        }
    }
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the current sale.
#[derive(Debug, Clone)]
pub struct SaleState {
    draft: Arc<Mutex<SaleDraft>>,
}

impl SaleState {
    /// Creates an empty sale.
    pub fn new() -> Self {
        SaleState {
            draft: Arc::new(Mutex::new(SaleDraft::new())),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleDraft) -> R,
    {
        let draft = self.draft.lock().expect("Sale mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Sale mutex poisoned");
        f(&mut draft)
    }

    /// A copy of the draft, for work that has to cross an `.await`.
    pub fn snapshot(&self) -> SaleDraft {
        self.with_draft(SaleDraft::clone)
    }

    /// Runs the cart reducer and stores its output. Returns the new cart.
    pub fn dispatch(&self, event: CartEvent) -> Cart {
        self.with_draft_mut(|draft| {
            draft.cart = draft.cart.apply(event);
            draft.cart.clone()
        })
    }

    pub fn set_customer(&self, customer: CustomerDetails) {
        self.with_draft_mut(|draft| draft.customer = customer);
    }

    /// Starts a fresh sale.
    pub fn reset(&self) {
        self.with_draft_mut(|draft| *draft = SaleDraft::new());
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}
