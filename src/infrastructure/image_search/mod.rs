//! Image-search provider implementations

mod serper;

pub use serper::SerperImageSearch;
