//! v1 API Data Transfer Objects.
//!
//! Wire types for the v1 REST API, kept separate from the domain models in
//! `src/models/`. Field names are camelCase on the wire.

pub mod chat;
pub mod conversation;
pub mod medical;
pub mod profile;
pub mod session;
pub mod team;

pub use chat::*;
pub use conversation::*;
pub use medical::*;
pub use profile::*;
pub use session::*;
pub use team::*;
