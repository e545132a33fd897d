pub mod di;
pub mod error;
pub mod json;
pub mod repositories;
