//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod director_repo;
pub mod movie_repo;
pub mod review_repo;
pub mod user_repo;

pub use director_repo::DirectorRepo;
pub use movie_repo::MovieRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
