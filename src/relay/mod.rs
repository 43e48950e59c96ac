//! Interactive process relay.
//!
//! Runs an external command inside a pseudo-terminal, streams the combined
//! output incrementally to the caller, and reports a success/failure
//! outcome derived from the exit status once the stream is drained. All
//! failure information flows through the event stream; launching a session
//! never returns an error.

mod command;
mod decoder;
mod session;

pub use command::Command;
pub use decoder::ChunkDecoder;
pub use session::{Outcome, RelayEvent, RelaySession, SessionId};
