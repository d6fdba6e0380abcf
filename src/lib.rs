//! Core of the Reframe guided experience: the wizard step machine and its
//! query-mapping protocol, the reflection option resolver, and the
//! generation-service client with static fallback reconciliation.
//!
//! Presentation concerns (animation timing, audio, markup) live outside this
//! crate; the modules here expose the state, predicates, and constants the
//! presentation layer reads.

pub mod config;
pub mod error;
pub mod flow;
pub mod generation;
pub mod http;
pub mod reflections;
pub mod results;
pub mod sessions;
pub mod state;

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv().ok() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
