//! Core domain layer for the NeuroScan backend.
//!
//! Hosts the ephemeral credential and session state manager: bearer token
//! issue/verify, one-time password lifecycle, per-principal conversation
//! sessions, and the request-level auth gate, plus the narrow contracts
//! for the external collaborators (durable account store, mail dispatcher,
//! assistant backend). Nothing in this crate touches durable storage.

pub mod assistant;
pub mod auth;
pub mod chat;
pub mod clock;
pub mod config;
pub mod error;
pub mod mail;
pub mod otp;
pub mod user;

// Re-export common error type
pub use error::{CoreError, Result};
