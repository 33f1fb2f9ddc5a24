//! Integration tests for the curation overlay: featured/panel rank
//! assignment, slot eviction, and clearing.

use sqlx::PgPool;

use kusina_core::types::DbId;
use kusina_db::models::dish::CreateDish;
use kusina_db::models::municipality::CreateMunicipality;
use kusina_db::models::restaurant::CreateRestaurant;
use kusina_db::repositories::{DishRepo, MunicipalityRepo, RestaurantRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_municipality(pool: &PgPool, name: &str) -> DbId {
    MunicipalityRepo::create(
        pool,
        &CreateMunicipality {
            name: name.to_string(),
            slug: None,
            province: None,
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_dish(pool: &PgPool, municipality_id: DbId, name: &str) -> DbId {
    DishRepo::create(
        pool,
        &CreateDish {
            municipality_id,
            name: name.to_string(),
            slug: None,
            description: None,
            flavor_profile: None,
            ingredients: None,
            image_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_restaurant(pool: &PgPool, municipality_id: DbId, name: &str) -> DbId {
    RestaurantRepo::create(
        pool,
        &CreateRestaurant {
            municipality_id,
            name: name.to_string(),
            slug: None,
            description: None,
            address: None,
            cuisine_types: None,
            image_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn panel_rank(pool: &PgPool, dish_id: DbId) -> Option<i32> {
    DishRepo::find_by_id(pool, dish_id)
        .await
        .unwrap()
        .unwrap()
        .panel_rank
}

// ---------------------------------------------------------------------------
// Panel rank
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_panel_rank_assignment(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish = seed_dish(&pool, m, "Adobo").await;

    let updated = DishRepo::set_panel_rank(&pool, dish, Some(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.panel_rank, Some(1));
    assert!(updated.is_signature, "rank assignment marks the dish signature");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_panel_rank_evicts_previous_holder(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish_a = seed_dish(&pool, m, "Adobo").await;
    let dish_b = seed_dish(&pool, m, "Sisig").await;

    DishRepo::set_panel_rank(&pool, dish_a, Some(1))
        .await
        .unwrap()
        .unwrap();
    let b = DishRepo::set_panel_rank(&pool, dish_b, Some(1))
        .await
        .unwrap()
        .unwrap();

    // B now holds rank 1; A's rank was cleared -- never both.
    assert_eq!(b.panel_rank, Some(1));
    assert_eq!(panel_rank(&pool, dish_a).await, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_panel_rank_scoped_to_municipality(pool: PgPool) {
    let m1 = seed_municipality(&pool, "Pila").await;
    let m2 = seed_municipality(&pool, "Paete").await;
    let dish_a = seed_dish(&pool, m1, "Adobo").await;
    let dish_b = seed_dish(&pool, m2, "Sisig").await;

    DishRepo::set_panel_rank(&pool, dish_a, Some(1))
        .await
        .unwrap()
        .unwrap();
    DishRepo::set_panel_rank(&pool, dish_b, Some(1))
        .await
        .unwrap()
        .unwrap();

    // Same rank in different municipalities coexists.
    assert_eq!(panel_rank(&pool, dish_a).await, Some(1));
    assert_eq!(panel_rank(&pool, dish_b).await, Some(1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clearing_panel_rank_leaves_others_alone(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish_a = seed_dish(&pool, m, "Adobo").await;
    let dish_b = seed_dish(&pool, m, "Sisig").await;

    DishRepo::set_panel_rank(&pool, dish_a, Some(1))
        .await
        .unwrap()
        .unwrap();
    DishRepo::set_panel_rank(&pool, dish_b, Some(2))
        .await
        .unwrap()
        .unwrap();

    let cleared = DishRepo::set_panel_rank(&pool, dish_a, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.panel_rank, None);
    // Clearing does not touch the signature flag or other holders.
    assert!(cleared.is_signature);
    assert_eq!(panel_rank(&pool, dish_b).await, Some(2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsetting_signature_clears_panel_rank(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish = seed_dish(&pool, m, "Adobo").await;

    DishRepo::set_panel_rank(&pool, dish, Some(3))
        .await
        .unwrap()
        .unwrap();
    let updated = DishRepo::set_signature(&pool, dish, false)
        .await
        .unwrap()
        .unwrap();

    assert!(!updated.is_signature);
    assert_eq!(updated.panel_rank, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_panel_rank_on_missing_dish(pool: PgPool) {
    let result = DishRepo::set_panel_rank(&pool, 999_999, Some(1)).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Featured rank
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_rank_evicts_previous_holder(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish_a = seed_dish(&pool, m, "Adobo").await;
    let dish_b = seed_dish(&pool, m, "Sisig").await;

    let a = DishRepo::set_featured_rank(&pool, dish_a, Some(1))
        .await
        .unwrap()
        .unwrap();
    assert!(a.featured, "rank assignment marks the dish featured");
    assert_eq!(a.featured_rank, Some(1));

    let b = DishRepo::set_featured_rank(&pool, dish_b, Some(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(b.featured_rank, Some(1));

    let a = DishRepo::find_by_id(&pool, dish_a).await.unwrap().unwrap();
    assert_eq!(a.featured_rank, None);
    // Eviction clears only the rank slot; the dish stays featured.
    assert!(a.featured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unfeaturing_clears_rank(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let dish = seed_dish(&pool, m, "Adobo").await;

    DishRepo::set_featured_rank(&pool, dish, Some(2))
        .await
        .unwrap()
        .unwrap();
    let updated = DishRepo::set_featured(&pool, dish, false)
        .await
        .unwrap()
        .unwrap();

    assert!(!updated.featured);
    assert_eq!(updated.featured_rank, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restaurant_featured_rank_eviction(pool: PgPool) {
    let m = seed_municipality(&pool, "Pila").await;
    let r1 = seed_restaurant(&pool, m, "Aling Nena's").await;
    let r2 = seed_restaurant(&pool, m, "Kusina ni Juan").await;

    RestaurantRepo::set_featured_rank(&pool, r1, Some(1))
        .await
        .unwrap()
        .unwrap();
    let second = RestaurantRepo::set_featured_rank(&pool, r2, Some(1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.featured_rank, Some(1));
    let first = RestaurantRepo::find_by_id(&pool, r1).await.unwrap().unwrap();
    assert_eq!(first.featured_rank, None);
}
