//! Blueprint types: data describing how the viewer lays out and configures
//! views rather than data being visualized.
//!
//! ⚠ These types are unstable and may change in ways that are not backwards
//! compatible on the wire.

/// Blueprint archetypes.
pub mod archetypes;

/// Blueprint components.
pub mod components;
