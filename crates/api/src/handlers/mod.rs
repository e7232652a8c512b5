pub mod ad;
pub mod feedback;
pub mod reservation;
pub mod user;
