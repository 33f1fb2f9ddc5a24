//! HTTP-level integration tests for the curation panel and the ranked
//! listing endpoints it drives.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use kusina_core::types::DbId;
use kusina_db::models::dish::CreateDish;
use kusina_db::models::municipality::CreateMunicipality;
use kusina_db::models::restaurant::CreateRestaurant;
use kusina_db::repositories::{DishRepo, MunicipalityRepo, RestaurantRepo};

async fn seed_municipality(pool: &PgPool) -> DbId {
    MunicipalityRepo::create(
        pool,
        &CreateMunicipality {
            name: "Pila".to_string(),
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

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_curation_requires_curator_role(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let dish = seed_dish(&pool, m, "Adobo").await;
    let (_, user_token) = common::seed_user(&pool, "alice", "user").await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish}"),
        &user_token,
        serde_json::json!({"panel_rank": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_may_curate(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let dish = seed_dish(&pool, m, "Adobo").await;
    let (_, owner_token) = common::seed_user(&pool, "owner", "owner").await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish}"),
        &owner_token,
        serde_json::json!({"panel_rank": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["data"]["panel_rank"], 2);
    assert_eq!(json["data"]["is_signature"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_panel_rank_eviction_over_http(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let dish_a = seed_dish(&pool, m, "Adobo").await;
    let dish_b = seed_dish(&pool, m, "Sisig").await;
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    let app = common::build_test_app(pool.clone());
    common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish_a}"),
        &admin_token,
        serde_json::json!({"panel_rank": 1}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish_b}"),
        &admin_token,
        serde_json::json!({"panel_rank": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["panel_rank"], 1);

    // Dish A lost the slot -- never both set.
    let app = common::build_test_app(pool);
    let a = common::body_json(common::get(app, &format!("/api/v1/dishes/{dish_a}")).await).await;
    assert_eq!(a["data"]["panel_rank"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_null_clears_rank(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let dish = seed_dish(&pool, m, "Adobo").await;
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    let app = common::build_test_app(pool.clone());
    common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish}"),
        &admin_token,
        serde_json::json!({"panel_rank": 3}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish}"),
        &admin_token,
        serde_json::json!({"panel_rank": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["panel_rank"], serde_json::Value::Null);
    // The signature flag survives a rank clear.
    assert_eq!(json["data"]["is_signature"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_positive_rank_rejected(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let dish = seed_dish(&pool, m, "Adobo").await;
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{dish}"),
        &admin_token,
        serde_json::json!({"featured_rank": 0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_dish_leads_top_listing(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let featured = seed_dish(&pool, m, "Adobo").await;
    let rated = seed_dish(&pool, m, "Sisig").await;
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    // Give the non-featured dish the better computed aggregate.
    sqlx::query("UPDATE dishes SET average_rating = 4.9, total_ratings = 20 WHERE id = $1")
        .bind(rated)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE dishes SET average_rating = 4.0, total_ratings = 5 WHERE id = $1")
        .bind(featured)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    common::patch_json_auth(
        app,
        &format!("/api/v1/admin/dishes/{featured}"),
        &admin_token,
        serde_json::json!({"featured": true}),
    )
    .await;

    let app = common::build_test_app(pool);
    let top = common::body_json(
        common::get(app, &format!("/api/v1/municipalities/{m}/dishes/top?limit=5")).await,
    )
    .await;
    let names: Vec<&str> = top["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Adobo", "Sisig"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restaurant_featured_rank_over_http(pool: PgPool) {
    let m = seed_municipality(&pool).await;
    let restaurant = RestaurantRepo::create(
        &pool,
        &CreateRestaurant {
            municipality_id: m,
            name: "Bistro".to_string(),
            slug: None,
            description: None,
            address: None,
            cuisine_types: None,
            image_url: None,
        },
    )
    .await
    .unwrap();
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/admin/restaurants/{}", restaurant.id),
        &admin_token,
        serde_json::json!({"featured_rank": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["data"]["featured"], true);
    assert_eq!(json["data"]["featured_rank"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_curation_of_missing_dish_is_404(pool: PgPool) {
    let (_, admin_token) = common::seed_user(&pool, "admin", "admin").await;

    let app = common::build_test_app(pool);
    let response = common::patch_json_auth(
        app,
        "/api/v1/admin/dishes/999999",
        &admin_token,
        serde_json::json!({"featured": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
