//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod restaurant_repo;

pub use restaurant_repo::RestaurantRepo;
