//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistence stores and the vision analyzer clients.

pub mod storage;
pub mod vision;
