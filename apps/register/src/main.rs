//! # Mostrador Register Entry Point
//!
//! ```text
//! $ register
//! login caja@mostrador.test mostrador
//! add dino-bebe
//! promo promo-apertura
//! customer Ana 5550101
//! checkout
//! {"ok":{"saleId":"…","ticketNumber":"20240301-0001",…}}
//! ```
//!
//! The actual setup is in lib.rs.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    register::run().await
}
