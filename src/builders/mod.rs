//! Builders to construct the delay context from configuration.

pub mod context_builder;

pub use context_builder::FakePingBuilder;
