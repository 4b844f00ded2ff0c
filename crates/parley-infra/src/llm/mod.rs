//! Completion provider implementations.
//!
//! Contains the OpenAI-backed implementation of the [`CompletionProvider`]
//! trait defined in `parley-core`. Any OpenAI-compatible endpoint works,
//! since the base URL is configurable.
//!
//! [`CompletionProvider`]: parley_core::completion::provider::CompletionProvider

pub mod openai;
