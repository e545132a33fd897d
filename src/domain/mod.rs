// src/domain/mod.rs
pub mod error;
pub mod navigation;
pub mod payload;
pub mod query;
pub mod record;
pub mod repositories;
pub mod search;
pub mod sort;
pub mod stats;
pub mod tree;
