pub mod chat;
pub mod conversations;
pub(crate) mod health;
pub mod medical;
pub mod profile;
pub mod sessions;
pub mod team;

pub use health::health_check;
