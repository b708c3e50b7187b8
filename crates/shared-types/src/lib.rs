pub mod catalogue;
pub mod types;

pub use catalogue::{ActRecord, CircularRecord};
pub use types::{HeadingCandidate, KeywordSet, PageText, SectionBody, PAGE_BREAK};
