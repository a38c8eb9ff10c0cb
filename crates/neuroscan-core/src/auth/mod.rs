//! Authentication primitives.
//!
//! This module contains the identity asserted by a verified token
//! ([`Principal`]), the stateless signer/verifier ([`TokenIssuer`]) and the
//! request-level guard ([`AuthGate`]) that is the only consumer-facing
//! entry point into token verification.

pub mod gate;
pub mod principal;
pub mod token;

pub use gate::AuthGate;
pub use principal::Principal;
pub use token::{TokenError, TokenIssuer};
