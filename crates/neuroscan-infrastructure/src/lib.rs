//! Storage and transport backends for the NeuroScan backend.
//!
//! In-memory repository implementations for single-process deployments
//! and the HTTP mail dispatcher. Each backend implements a core trait, so
//! call sites never depend on this crate's concrete types.

pub mod http_mail_dispatcher;
pub mod memory_otp_repository;
pub mod memory_session_repository;
pub mod memory_user_directory;

pub use crate::http_mail_dispatcher::HttpMailDispatcher;
pub use crate::memory_otp_repository::MemoryOtpRepository;
pub use crate::memory_session_repository::MemorySessionRepository;
pub use crate::memory_user_directory::MemoryUserDirectory;
