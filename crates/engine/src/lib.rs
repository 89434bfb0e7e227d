//! ORBAT Engine library.
//!
//! Stores military rosters (groups with direct members, teams and vehicle
//! crews) and the shared weapon/vehicle catalog they draw from.
//!
//! ## Structure
//!
//! - `use_cases/` - Roster and catalog operations over the ports
//! - `infrastructure/` - Ports, SQLite adapters, image store, configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
