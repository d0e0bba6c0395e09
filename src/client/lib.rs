//! Court reservation client.
//!
//! Scans each court's half-hour availability grid for the date that opens
//! next, picks the best bookable block and submits an order for it.

pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod ground;
pub mod policy;
pub mod ranker;
pub mod release;
pub mod request;
pub mod reserve;
pub mod scanner;

pub use api::{BookingService, Client};
pub use error::{BookingError, BookingResult};
pub use reserve::{run, CourtOutcome, RunPlan, RunReport};
