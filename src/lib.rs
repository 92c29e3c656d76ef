//! Rental listing browser core: a swipe deck with undo, a gesture
//! classifier, a durable interest store, a cached sheet-backed listing
//! source and typed generative-AI flows.

pub mod config;
pub mod error;
pub mod flows;
pub mod interest;
pub mod models;
pub mod sources;
pub mod swipe;

pub use config::Config;
pub use models::{Availability, Listing, SheetListing};
