//! Domain layer: fleet financial model, metrics engine, repository traits

pub mod model;
pub mod repository;
pub mod service;
