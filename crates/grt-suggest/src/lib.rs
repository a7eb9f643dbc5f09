//! # grt-suggest
//!
//! Goal suggestion providers for the Goal Reflection Tracker.
//!
//! The tracker asks a [`SuggestionProvider`] for candidate goals for the
//! selected principle. The only built-in provider is [`MockSuggestionProvider`],
//! which answers from a fixed table after a simulated network delay. A real
//! AI back end plugs in by implementing the same trait.
//!
//! ## Key components
//!
//! - [`SuggestionProvider`]: async fetch-by-principle-id seam
//! - [`MockSuggestionProvider`]: fixed-latency lookup in the curated table
//! - [`suggestions_for`]: the curated table itself
//! - [`ProviderConfig`] / [`build_provider`]: selects a provider from config

pub mod error;
pub mod mock;
pub mod provider;

pub use error::SuggestError;
pub use mock::{suggestions_for, MockSuggestionProvider, DEFAULT_LATENCY};
pub use provider::{build_provider, ProviderConfig, SuggestionProvider};
