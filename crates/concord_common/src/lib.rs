//! Shared foundational types used across the Concord toolchain.
//!
//! This crate provides the value types that identify integration artifacts
//! (profiles, maps, providers), content hashing for cache invalidation, and
//! the provenance record attached to every resolved artifact.

#![warn(missing_docs)]

pub mod hash;
pub mod id;
pub mod provenance;

pub use hash::ContentHash;
pub use id::{MapId, MapVersion, ParseIdError, ProfileId, ProfileVersion};
pub use provenance::Provenance;
