//! Library root so integration tests can build the router in-process.

pub mod config;
pub mod domain;
pub mod engine;
pub mod format;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;

pub use routes::build_router;
