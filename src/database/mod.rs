//! Central hub for all persisted state. Every SQL statement in the crate
//! lives in these modules; the rest of the code goes through their
//! functions, never through the pool directly.

pub mod init;
pub mod missing;
pub mod models;
pub mod registrations;

pub use init::{connect, DbPool};
