//! Route modules for the relay

pub mod analyze;
pub mod health;
