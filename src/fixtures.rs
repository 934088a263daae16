//! In-memory mock data seeded at startup. Stands in for the source's
//! module-load fixtures; nothing here survives a restart.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::models::{
    Cake, CakeSize, Cream, Decoration, DeliveryZone, Flavor, Promotion, StaffUser, Topping,
};
use crate::store::{CatalogStore, CustomLoafConfig};

const STAFF_EMAIL: &str = "admin@cakeshop.test";
const STAFF_PASSWORD: &str = "admin123";

pub fn seed_catalog() -> anyhow::Result<CatalogStore> {
    Ok(CatalogStore {
        cakes: seed_cakes(),
        creams: seed_creams(),
        decorations: seed_decorations(),
        flavors: seed_flavors(),
        toppings: seed_toppings(),
        zones: seed_zones(),
        slots: vec![
            "09:00-12:00".to_string(),
            "12:00-15:00".to_string(),
            "15:00-18:00".to_string(),
        ],
        promotions: seed_promotions(),
        staff: seed_staff()?,
        loaf: CustomLoafConfig {
            base_price: 2000,
            max_selections: 4,
        },
    })
}

fn cake(name: &str, description: &str, sizes: &[(&str, i64)]) -> Cake {
    Cake {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(description.to_string()),
        sizes: sizes
            .iter()
            .map(|&(label, price)| CakeSize {
                label: label.to_string(),
                price,
            })
            .collect(),
        available: true,
        created_at: Utc::now(),
    }
}

fn seed_cakes() -> Vec<Cake> {
    vec![
        cake(
            "Vanilla Celebration",
            "Classic vanilla sponge with buttercream",
            &[("6-inch", 1500), ("8-inch", 2200), ("10-inch", 3000)],
        ),
        cake(
            "Red Velvet",
            "Cocoa sponge with cream cheese frosting",
            &[("6-inch", 1800), ("8-inch", 2600)],
        ),
        cake(
            "Chocolate Fudge",
            "Dark chocolate layers with fudge filling",
            &[("6-inch", 1700), ("8-inch", 2500), ("10-inch", 3400)],
        ),
        cake(
            "Lemon Drizzle",
            "Zesty lemon sponge with sugar glaze",
            &[("6-inch", 1400), ("8-inch", 2000)],
        ),
    ]
}

fn seed_creams() -> Vec<Cream> {
    [("Whipped vanilla", 50), ("Cream cheese", 80), ("Chocolate ganache", 100)]
        .into_iter()
        .map(|(name, price)| Cream {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
        })
        .collect()
}

fn seed_decorations() -> Vec<Decoration> {
    [
        ("Sugar flowers", 80),
        ("Gold leaf", 40),
        ("Happy Birthday topper", 60),
        ("Chocolate shards", 50),
    ]
    .into_iter()
    .map(|(name, price)| Decoration {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
    })
    .collect()
}

fn seed_flavors() -> Vec<Flavor> {
    ["Vanilla", "Chocolate", "Lemon", "Marble", "Banana"]
        .into_iter()
        .map(|name| Flavor {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
        .collect()
}

fn seed_toppings() -> Vec<Topping> {
    [("Salted caramel", 90), ("Toasted almonds", 70), ("Berry compote", 85)]
        .into_iter()
        .map(|(name, price)| Topping {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
        })
        .collect()
}

fn seed_zones() -> Vec<DeliveryZone> {
    [("Westlands", 300), ("Kilimani", 250), ("Karen", 450), ("CBD", 200)]
        .into_iter()
        .map(|(name, fee)| DeliveryZone {
            id: Uuid::new_v4(),
            name: name.to_string(),
            fee,
        })
        .collect()
}

fn seed_promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: Uuid::new_v4(),
            code: "WELCOME200".to_string(),
            discount: 200,
            active: true,
        },
        Promotion {
            id: Uuid::new_v4(),
            code: "EASTER500".to_string(),
            discount: 500,
            active: false,
        },
    ]
}

fn seed_staff() -> anyhow::Result<Vec<StaffUser>> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(STAFF_PASSWORD.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    Ok(vec![StaffUser {
        id: Uuid::new_v4(),
        email: STAFF_EMAIL.to_string(),
        password_hash,
        role: "admin".to_string(),
        created_at: Utc::now(),
    }])
}
