//! Type catalog service: account pages, the JSON catalog endpoint and the
//! loader that refreshes the catalog from a reference page.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod memory;
pub mod pages;
pub mod state;
pub mod telemetry;
