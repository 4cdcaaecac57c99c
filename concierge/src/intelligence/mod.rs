pub mod advice;
pub mod emergency;
pub mod keywords;
pub mod memory;
pub mod referral;
pub mod registry;
pub mod router;
pub mod utils;

pub use advice::AdviceComposer;
pub use emergency::EmergencyDetector;
pub use keywords::KeywordTaxonomy;
pub use memory::ConversationMemory;
pub use registry::SpecialistRegistry;
pub use router::SpecialistRouter;
