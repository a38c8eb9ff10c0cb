//! Conversational session state.
//!
//! Maps a principal to a running conversational context with bounded
//! output and the scoped-assistant persona baked into initialization.

pub mod message;
pub mod persona;
pub mod repository;
pub mod session;
pub mod store;

pub use message::{ConversationTurn, TurnRole};
pub use persona::{MEDIBOT_PERSONA, Persona};
pub use repository::{SessionHandle, SessionRepository};
pub use session::ConversationSession;
pub use store::ConversationSessionStore;
