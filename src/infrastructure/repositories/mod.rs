//! Repository implementations using SeaORM

pub mod forest_repository;
pub mod hunter_repository;
pub mod mushroom_repository;
pub mod visit_repository;

pub use forest_repository::SeaOrmForestRepository;
pub use hunter_repository::SeaOrmHunterRepository;
pub use mushroom_repository::SeaOrmMushroomRepository;
pub use visit_repository::SeaOrmVisitRepository;
