mod alert;
mod chat;
mod profile;
mod session;
mod specialist;

pub use alert::*;
pub use chat::*;
pub use profile::*;
pub use session::*;
pub use specialist::*;
