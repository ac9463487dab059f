//! Strongly-typed archetype records over Apache Arrow.
//!
//! An archetype is a fixed set of optional fields. Each present field holds a
//! [`SerializedComponentBatch`]: an Arrow array of one component type tagged
//! with a stable [`ComponentDescriptor`]. Archetypes are assembled through an
//! [`ArchetypeBuilder`], serialized to their present batches in declaration
//! order, and partitioned into row-aligned [`SerializedComponentColumn`]s that
//! can be bundled into a [`ColumnChunk`] and shipped as Arrow IPC.

mod observability;

/// Field descriptors: the stable wire identity of every archetype field.
pub mod descriptor;

/// Error types shared by serialization, partitioning and decoding.
pub mod error;

/// Conversion of value types to and from Arrow arrays.
pub mod loggable;

/// Reusable value types that components delegate to.
pub mod datatypes;

/// Named component types.
pub mod components;

/// Blueprint components and archetypes describing viewer layout.
pub mod blueprint;

/// Concrete archetypes.
pub mod archetypes;

/// Typed batches of component data.
pub mod batch;

/// Row-aligned partitions of component batches.
pub mod column;

/// Archetype traits and the fallible builder.
pub mod archetype;

/// Column chunks and their Arrow IPC encoding.
pub mod chunk;

/// Configuration for chunk encoding.
pub mod option;

pub use crate::{
    archetype::{Archetype, ArchetypeBuilder, AsComponents},
    batch::SerializedComponentBatch,
    chunk::{ColumnChunk, IndexColumn, IndexKind},
    column::SerializedComponentColumn,
    descriptor::{ArchetypeName, ComponentDescriptor, ComponentIdentifier, ComponentType},
    error::{
        ChunkError, ChunkResult, DeserializationError, DeserializationResult, SerializationError,
        SerializationResult,
    },
    loggable::{Component, Loggable},
    option::ChunkOption,
};
