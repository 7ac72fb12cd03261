//! # Registries
//!
//! Object lifetime registries backing the sequencing core. The retention
//! registry keeps each in-flight command instance reachable while its
//! asynchronous work is outstanding.

pub mod retention_registry;

pub use retention_registry::{InMemoryRetention, RetentionRegistry};
