//! Shared infrastructure

pub mod models;
