//! Row structs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! its conversion into the corresponding `marketplace_core` entity. Input
//! DTOs live in the core crate next to their validation rules.

pub mod ad;
pub mod feedback;
pub mod reservation;
pub mod user;
