use arrow::{datatypes::DataType, error::ArrowError};
use thiserror::Error;

use crate::descriptor::{ComponentDescriptor, ComponentType};

pub type SerializationResult<T> = Result<T, SerializationError>;

pub type DeserializationResult<T> = Result<T, DeserializationError>;

pub type ChunkResult<T> = Result<T, ChunkError>;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("type mismatch for {descriptor}: expected component {expected}, got {actual}")]
    TypeMismatch {
        descriptor: ComponentDescriptor,
        expected: ComponentType,
        actual: ComponentType,
    },
    #[error("partition lengths of {descriptor} sum to {sum}, but the batch holds {len} elements")]
    LengthMismatch {
        descriptor: ComponentDescriptor,
        len: usize,
        sum: usize,
    },
    #[error("{len} elements do not fit into 32-bit list offsets")]
    OffsetOverflow { len: usize },
    #[error("column {name} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("component {0} appears more than once")]
    DuplicateComponent(ComponentDescriptor),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("datatype mismatch: expected {expected}, got {actual}")]
    DatatypeMismatch {
        expected: DataType,
        actual: DataType,
    },
    #[error("missing data: {0} contains nulls")]
    MissingData(DataType),
    #[error("invalid value {value} for enum {type_name}")]
    InvalidEnumValue { type_name: &'static str, value: u8 },
    #[error("batch {descriptor} cannot be decoded as {requested}")]
    ComponentMismatch {
        descriptor: ComponentDescriptor,
        requested: ComponentType,
    },
    #[error("missing metadata: {0}")]
    MissingMetadata(String),
    #[error("column {name} is not a list column: {actual}")]
    NotAList { name: String, actual: DataType },
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl DeserializationError {
    pub(crate) fn datatype_mismatch(expected: DataType, actual: &DataType) -> Self {
        DeserializationError::DatatypeMismatch {
            expected,
            actual: actual.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
    #[error("deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
