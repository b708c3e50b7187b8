//! Catalogue records read from metadata files next to each PDF

/// One act listed in the Bare Acts catalogue
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActRecord {
    pub title: String,
    pub act_number: u32,
    pub act_year: u16,
    pub date: String, // e.g. "[1st March, 1950]"
    pub pdf: String,
}

/// One circular listed in the circulars catalogue
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CircularRecord {
    pub issuer: String,
    pub date: String,
    pub signatory: String,
    pub pdf: String,
}
