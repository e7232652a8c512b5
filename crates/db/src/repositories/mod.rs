//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ad_repo;
pub mod feedback_repo;
pub mod reservation_repo;
pub mod user_repo;

pub use ad_repo::AdRepo;
pub use feedback_repo::FeedbackRepo;
pub use reservation_repo::ReservationRepo;
pub use user_repo::UserRepo;
