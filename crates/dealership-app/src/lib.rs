//! Application service layer - config, backend selection, inventory use cases

pub mod app;
pub mod config;
pub mod repository;
