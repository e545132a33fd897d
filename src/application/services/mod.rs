// src/application/services/mod.rs
pub mod catalog_service;
pub mod catalog_service_impl;
