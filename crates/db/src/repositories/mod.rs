//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dish_repo;
pub mod favorite_repo;
pub mod municipality_repo;
pub mod rating_repo;
pub mod restaurant_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use dish_repo::DishRepo;
pub use favorite_repo::FavoriteRepo;
pub use municipality_repo::MunicipalityRepo;
pub use rating_repo::RatingRepo;
pub use restaurant_repo::RestaurantRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
