// src/application/mod.rs
pub mod error;
pub mod services;

pub use services::catalog_service_impl::CatalogServiceImpl;
