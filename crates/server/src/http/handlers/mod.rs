pub mod challenge;
pub mod reviews;
