//! # Demo Data
//!
//! A small, fixed catalog for the `register` binary and for tests.
//!
//! ```text
//! Accesorios ── Gorro Tejido      Bebé / Peque / Adulto
//! Pijamas ───── Pijama Estrellas  Bebé / Peque / Adulto
//! Ropa ──────── Camiseta Dino     Bebé / Peque / Adulto
//!
//! Promotions:   Apertura 15%      (percent off)
//!               Lleva 5           (cheapest unit free at 5 units)
//!
//! User:         caja@mostrador.test / mostrador
//! ```
//!
//! Seed ids are readable strings so they can be typed at the register.

use chrono::Utc;
use mostrador_core::{Category, Money, Percent, Promotion, PromotionRule, PromotionWindow};

use crate::memory::{
    CatalogTables, IdentityTables, InMemoryBackend, ProductRow, SalesTables, UserRow, VariantRow,
};
use crate::service::User;

pub const DEMO_EMAIL: &str = "caja@mostrador.test";
pub const DEMO_PASSWORD: &str = "mostrador";

pub const DINO_BEBE: &str = "dino-bebe";
pub const DINO_PEQUE: &str = "dino-peque";
pub const DINO_ADULTO: &str = "dino-adulto";
pub const GORRO_BEBE: &str = "gorro-bebe";

pub const PROMO_APERTURA: &str = "promo-apertura";
pub const PROMO_LLEVA_5: &str = "promo-lleva-5";

/// (variant suffix, variant name, cost, price) in whole currency units.
type SizeRow = (&'static str, &'static str, i64, i64);

fn product(
    catalog: &mut CatalogTables,
    id: &str,
    category_id: &str,
    name: &str,
    description: &str,
    sizes: [SizeRow; 3],
) {
    catalog.products.push(ProductRow {
        id: id.to_string(),
        category_id: category_id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        active: true,
    });

    for (suffix, variant_name, cost, price) in sizes {
        catalog.variants.push(VariantRow {
            id: format!("{}-{}", id, suffix),
            product_id: id.to_string(),
            name: variant_name.to_string(),
            unit_cost: Money::from_major(cost),
            unit_price: Money::from_major(price),
            active: true,
        });
    }
}

fn category(id: &str, name: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        color: color.to_string(),
        active: true,
    }
}

/// Builds a backend holding the demo catalog, promotions and user.
pub fn demo() -> InMemoryBackend {
    let mut catalog = CatalogTables::default();
    catalog.categories = vec![
        category("cat-ropa", "Ropa", "#E8A0BF"),
        category("cat-pijamas", "Pijamas", "#88B04B"),
        category("cat-accesorios", "Accesorios", "#F7CAC9"),
    ];

    product(
        &mut catalog,
        "dino",
        "cat-ropa",
        "Camiseta Dino",
        "Camiseta de algodón con estampado de dinosaurio",
        [
            ("bebe", "Bebé", 90, 180),
            ("peque", "Peque", 110, 220),
            ("adulto", "Adulto", 140, 280),
        ],
    );
    product(
        &mut catalog,
        "estrellas",
        "cat-pijamas",
        "Pijama Estrellas",
        "Pijama de franela, dos piezas",
        [
            ("bebe", "Bebé", 170, 350),
            ("peque", "Peque", 200, 420),
            ("adulto", "Adulto", 250, 520),
        ],
    );
    product(
        &mut catalog,
        "gorro",
        "cat-accesorios",
        "Gorro Tejido",
        "Gorro tejido a mano",
        [
            ("bebe", "Bebé", 40, 90),
            ("peque", "Peque", 45, 100),
            ("adulto", "Adulto", 55, 120),
        ],
    );

    let now = Utc::now();
    let promotions = vec![
        Promotion {
            id: PROMO_APERTURA.to_string(),
            name: "Apertura 15%".to_string(),
            description: Some("Descuento de apertura".to_string()),
            rule: PromotionRule::PercentOff {
                rate: Percent::from_whole(15),
            },
            window: PromotionWindow::always(),
            active: true,
            created_at: now,
            updated_at: now,
        },
        Promotion {
            id: PROMO_LLEVA_5.to_string(),
            name: "Lleva 5".to_string(),
            description: Some("La pieza más barata gratis".to_string()),
            rule: PromotionRule::FreeItem { threshold: None },
            window: PromotionWindow::always(),
            active: true,
            created_at: now,
            updated_at: now,
        },
    ];

    let identity = IdentityTables {
        users: vec![UserRow {
            user: User {
                id: "user-caja".to_string(),
                email: DEMO_EMAIL.to_string(),
                display_name: "Caja 1".to_string(),
            },
            password: DEMO_PASSWORD.to_string(),
        }],
        session: None,
    };

    InMemoryBackend::from_tables(catalog, promotions, SalesTables::default(), identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{CatalogService, PromotionService};

    #[tokio::test]
    async fn test_demo_contents() {
        let backend = demo();

        assert_eq!(backend.list_categories().await.unwrap().len(), 3);
        assert_eq!(backend.list_catalog_entries().await.unwrap().len(), 9);
        assert_eq!(backend.list_active_promotions().await.unwrap().len(), 2);

        let entries = backend.list_catalog_entries().await.unwrap();
        for id in [DINO_BEBE, DINO_PEQUE, DINO_ADULTO, GORRO_BEBE] {
            assert!(entries.iter().any(|e| e.variant_id == id), "missing {}", id);
        }
    }
}
