//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate sanitization and repository calls into use-case APIs.
//! - Keep CLI layers decoupled from storage details.

pub mod catalog_service;
