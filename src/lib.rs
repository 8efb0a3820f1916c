#![deny(unreachable_pub)]
pub mod config;
pub mod dashboard;
mod errors;
pub mod feed;
pub mod order;
mod runner;
pub mod selection;
pub mod server;
pub use errors::{Error, Result};
pub use runner::DashboardRunner;
