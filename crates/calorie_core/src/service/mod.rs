//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Fan committed changes out to observers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod calorie_service;
pub mod observer;
