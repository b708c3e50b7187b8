//! Catalogue of acts and circulars
//!
//! Each PDF in a collection has a sibling `.txt` metadata file. This crate
//! parses those files into records and sorts them for listing.

pub mod acts;
pub mod circulars;
pub mod dates;
pub mod error;
mod fs;

pub use acts::{load_acts, parse_act_metadata, sort_acts, ActSort};
pub use circulars::{load_circulars, parse_circular_metadata, sort_circulars, CircularSort};
pub use dates::parse_act_date;
pub use error::CatalogueError;
