//! One-time password lifecycle.
//!
//! Short-lived numeric codes used to authorize password resets. Records
//! live only in the configured [`OtpRepository`] backend and are destroyed
//! on first successful verification, on a superseding issue, or lazily on
//! an expired check.

pub mod model;
pub mod registry;
pub mod repository;

pub use model::OtpRecord;
pub use registry::OtpRegistry;
pub use repository::OtpRepository;
