//! Shopfloor Platform
//!
//! Multi-tenant backend for manufacturing enterprises: accounts and
//! sessions, enterprise onboarding and membership, and a catalog of
//! materials, machines, toolings, and tools scoped per enterprise with
//! system-wide general defaults.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use config::AppConfig;
pub use error::{Result, ServiceError};
