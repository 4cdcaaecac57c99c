mod concierge;

pub use concierge::{attachment_note, ChatExchange, ChatOutcome, ChatRequest, ConciergeService};
