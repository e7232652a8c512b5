//! Marketplace domain logic.
//!
//! This crate has zero internal dependencies and no database access: the
//! search engine and lifecycle guard talk to storage only through the
//! traits in [`ports`].

pub mod ad;
pub mod availability;
pub mod error;
pub mod feedback;
pub mod geo;
pub mod lifecycle;
pub mod ports;
pub mod rating;
pub mod reservation;
pub mod search;
pub mod types;
pub mod user;

#[cfg(test)]
mod testing;
