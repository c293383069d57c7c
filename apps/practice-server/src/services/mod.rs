//! Server-side collaborators: storage, speech output, timers and the session registry.

pub mod sessions;
pub mod speech;
pub mod store;
pub mod timers;
