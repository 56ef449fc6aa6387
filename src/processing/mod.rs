//! Sight-log events, sight reduction and the fix session

pub mod events;
pub mod reduction;
pub mod session;

pub use events::{DirectiveKind, Reading, SessionEvent, SightLog};
pub use reduction::AltitudeCorrections;
pub use session::{EventOutcome, FixSession, SessionConfig, SessionHalt, SessionState, Transition};
