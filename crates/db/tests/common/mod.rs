//! Shared fixtures for db integration tests.

use shelfsight_core::types::DbId;
use shelfsight_db::models::planogram::CreatePlanogram;
use shelfsight_db::models::profile::CreateProfile;
use shelfsight_db::models::shelf::CreateShelf;
use shelfsight_db::models::store::CreateStore;
use shelfsight_db::repositories::{PlanogramRepo, ProfileRepo, ShelfRepo, StoreRepo};
use sqlx::PgPool;

/// Create an employee profile with a throwaway password hash.
pub async fn seed_employee(pool: &PgPool, email: &str) -> DbId {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            password_hash: "$argon2id$test$hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "Employee".to_string(),
            role: "employee".to_string(),
        },
    )
    .await
    .expect("seed employee")
    .id
}

/// Create a store, a planogram, and a shelf wired together; returns the
/// shelf id.
pub async fn seed_shelf(pool: &PgPool) -> DbId {
    let store = StoreRepo::create(
        pool,
        &CreateStore {
            name: "Centro".to_string(),
            address: "Av. Principal 100".to_string(),
            manager_id: None,
        },
    )
    .await
    .expect("seed store");

    let planogram = PlanogramRepo::create(
        pool,
        &CreatePlanogram {
            name: "Beverages v2".to_string(),
            category: "beverages".to_string(),
            department: "Drinks".to_string(),
            status: None,
            slots_per_tray: None,
        },
    )
    .await
    .expect("seed planogram");

    ShelfRepo::create(
        pool,
        &CreateShelf {
            name: "Shelf 1".to_string(),
            store_id: store.id,
            planogram_id: planogram.id,
        },
    )
    .await
    .expect("seed shelf")
    .id
}
