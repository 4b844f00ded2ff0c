//! Chat persistence abstractions and metadata operations for Parley.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, plus the `ChatService` owning chat lifecycle rules.

pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod memory;
