use std::{collections::HashMap, io::Cursor, sync::Arc};

use arrow::{
    array::{Array, ArrayRef, AsArray, Int64Array, TimestampNanosecondArray, UInt32Array},
    compute::{concat_batches, take_record_batch},
    datatypes::{DataType, Field, Int64Type, Schema, TimeUnit, TimestampNanosecondType},
    error::ArrowError,
    ipc::{
        reader::StreamReader,
        writer::{IpcWriteOptions, StreamWriter},
        MetadataVersion,
    },
    record_batch::{RecordBatch, RecordBatchOptions},
};

use crate::{
    archetype::AsComponents,
    batch::SerializedComponentBatch,
    column::SerializedComponentColumn,
    descriptor::ComponentDescriptor,
    error::{
        ChunkResult, DeserializationError, DeserializationResult, SerializationError,
        SerializationResult,
    },
    observability::log_debug,
    option::ChunkOption,
};

/// Schema metadata key holding the entity path of a chunk.
pub const SCHEMA_METADATA_KEY_ENTITY_PATH: &str = "rerun:entity_path";

/// Field metadata key marking index columns.
pub const FIELD_METADATA_KEY_KIND: &str = "rerun:kind";

pub const FIELD_METADATA_VALUE_KIND_INDEX: &str = "index";

/// How the values of an index column are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Monotonic sequence numbers, stored as `Int64`.
    Sequence,
    /// Nanoseconds since the unix epoch.
    Timestamp,
}

impl IndexKind {
    pub fn arrow_datatype(&self) -> DataType {
        match self {
            IndexKind::Sequence => DataType::Int64,
            IndexKind::Timestamp => DataType::Timestamp(TimeUnit::Nanosecond, None),
        }
    }

    fn from_arrow_datatype(datatype: &DataType) -> Option<Self> {
        match datatype {
            DataType::Int64 => Some(IndexKind::Sequence),
            DataType::Timestamp(TimeUnit::Nanosecond, None) => Some(IndexKind::Timestamp),
            _ => None,
        }
    }
}

/// A named column of one index value per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    pub name: String,
    pub kind: IndexKind,
    pub values: Vec<i64>,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>, kind: IndexKind, values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            name: name.into(),
            kind,
            values: values.into_iter().collect(),
        }
    }

    #[inline]
    pub fn sequence(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(name, IndexKind::Sequence, values)
    }

    #[inline]
    pub fn timestamp(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(name, IndexKind::Timestamp, values)
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.values.len()
    }

    fn field(&self) -> Field {
        Field::new(self.name.as_str(), self.kind.arrow_datatype(), false).with_metadata(
            HashMap::from([(
                FIELD_METADATA_KEY_KIND.to_owned(),
                FIELD_METADATA_VALUE_KIND_INDEX.to_owned(),
            )]),
        )
    }

    fn to_arrow(&self) -> ArrayRef {
        match self.kind {
            IndexKind::Sequence => Arc::new(Int64Array::from(self.values.clone())),
            IndexKind::Timestamp => Arc::new(TimestampNanosecondArray::from(self.values.clone())),
        }
    }

    fn from_arrow(name: &str, array: &dyn Array) -> DeserializationResult<Self> {
        let kind = IndexKind::from_arrow_datatype(array.data_type()).ok_or_else(|| {
            DeserializationError::datatype_mismatch(DataType::Int64, array.data_type())
        })?;
        if array.null_count() > 0 {
            return Err(DeserializationError::MissingData(array.data_type().clone()));
        }
        let values = match kind {
            IndexKind::Sequence => array.as_primitive::<Int64Type>().values().to_vec(),
            IndexKind::Timestamp => array
                .as_primitive::<TimestampNanosecondType>()
                .values()
                .to_vec(),
        };
        Ok(Self::new(name, kind, values))
    }
}

/// A row-aligned bundle of index and component columns for one entity.
///
/// Every column has the same number of rows. Row `i` of a component column is
/// the batch that field had at index row `i`; an empty cell means the field was
/// cleared, a missing column means it was never set.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChunk {
    entity_path: String,
    indexes: Vec<IndexColumn>,
    columns: Vec<SerializedComponentColumn>,
}

impl ColumnChunk {
    pub fn new(entity_path: impl Into<String>) -> Self {
        Self {
            entity_path: entity_path.into(),
            indexes: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// A single-row chunk holding every set field of `archetype`.
    pub fn from_archetype<A>(
        entity_path: impl Into<String>,
        archetype: &A,
    ) -> SerializationResult<Self>
    where
        A: AsComponents + ?Sized,
    {
        let columns = archetype
            .as_serialized_batches()
            .into_iter()
            .map(|batch| {
                let len = batch.len();
                batch.partitioned([len])
            })
            .collect::<SerializationResult<Vec<_>>>()?;
        Self::new(entity_path).with_columns(columns)
    }

    #[inline]
    pub fn entity_path(&self) -> &str {
        &self.entity_path
    }

    #[inline]
    pub fn indexes(&self) -> &[IndexColumn] {
        &self.indexes
    }

    #[inline]
    pub fn components(&self) -> &[SerializedComponentColumn] {
        &self.columns
    }

    pub fn component(&self, descriptor: &ComponentDescriptor) -> Option<&SerializedComponentColumn> {
        self.columns
            .iter()
            .find(|column| &column.descriptor == descriptor)
    }

    fn expected_rows(&self) -> Option<usize> {
        self.indexes
            .first()
            .map(IndexColumn::num_rows)
            .or_else(|| self.columns.first().map(SerializedComponentColumn::num_rows))
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.expected_rows().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    fn check_rows(&self, name: &str, actual: usize) -> SerializationResult<()> {
        match self.expected_rows() {
            Some(expected) if expected != actual => Err(SerializationError::RowCountMismatch {
                name: name.to_owned(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    pub fn with_index(mut self, index: IndexColumn) -> SerializationResult<Self> {
        self.check_rows(&index.name, index.num_rows())?;
        self.indexes.push(index);
        Ok(self)
    }

    pub fn with_column(mut self, column: SerializedComponentColumn) -> SerializationResult<Self> {
        self.check_rows(column.descriptor.component.as_str(), column.num_rows())?;
        if self.component(&column.descriptor).is_some() {
            return Err(SerializationError::DuplicateComponent(column.descriptor));
        }
        self.columns.push(column);
        Ok(self)
    }

    pub fn with_columns(
        self,
        columns: impl IntoIterator<Item = SerializedComponentColumn>,
    ) -> SerializationResult<Self> {
        columns.into_iter().try_fold(self, Self::with_column)
    }

    /// The component batches of `row`, in column order.
    ///
    /// Feed them to [`crate::Archetype::from_arrow_components`] to get the
    /// record back.
    pub fn row(&self, row: usize) -> Option<Vec<SerializedComponentBatch>> {
        (row < self.num_rows()).then(|| {
            self.columns
                .iter()
                .filter_map(|column| column.sub_batch(row))
                .collect()
        })
    }

    /// The `(index name, value)` pairs of `row`, one per index column.
    pub fn index_values(&self, row: usize) -> Option<Vec<(&str, i64)>> {
        (row < self.num_rows()).then(|| {
            self.indexes
                .iter()
                .filter_map(|index| Some((index.name.as_str(), *index.values.get(row)?)))
                .collect()
        })
    }

    /// Every row with its index values, in row order.
    pub fn iter_rows(
        &self,
    ) -> impl Iterator<Item = (Vec<(&str, i64)>, Vec<SerializedComponentBatch>)> + '_ {
        (0..self.num_rows()).filter_map(|row| Some((self.index_values(row)?, self.row(row)?)))
    }

    /// The cells of one component column with the index values of their row.
    ///
    /// Null cells are skipped. Empty cells are yielded: they clear the field
    /// at that row.
    pub fn iter_component<'a>(
        &'a self,
        descriptor: &ComponentDescriptor,
    ) -> impl Iterator<Item = (Vec<(&'a str, i64)>, SerializedComponentBatch)> + 'a {
        self.component(descriptor).into_iter().flat_map(move |column| {
            (0..column.num_rows())
                .filter_map(move |row| Some((self.index_values(row)?, column.sub_batch(row)?)))
        })
    }

    pub fn to_record_batch(&self) -> SerializationResult<RecordBatch> {
        let num_fields = self.indexes.len() + self.columns.len();
        let mut fields = Vec::with_capacity(num_fields);
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(num_fields);

        for index in &self.indexes {
            fields.push(index.field());
            arrays.push(index.to_arrow());
        }
        for column in &self.columns {
            fields.push(column.field());
            arrays.push(Arc::new(column.list_array.clone()));
        }

        let schema = Schema::new_with_metadata(
            fields,
            HashMap::from([(
                SCHEMA_METADATA_KEY_ENTITY_PATH.to_owned(),
                self.entity_path.clone(),
            )]),
        );
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(schema),
            arrays,
            &options,
        )?)
    }

    pub fn from_record_batch(batch: &RecordBatch) -> ChunkResult<Self> {
        let schema = batch.schema();
        let entity_path = schema
            .metadata()
            .get(SCHEMA_METADATA_KEY_ENTITY_PATH)
            .cloned()
            .ok_or_else(|| {
                DeserializationError::MissingMetadata(SCHEMA_METADATA_KEY_ENTITY_PATH.to_owned())
            })?;

        let mut chunk = Self::new(entity_path);
        for (field, array) in schema.fields().iter().zip(batch.columns()) {
            let is_index = field
                .metadata()
                .get(FIELD_METADATA_KEY_KIND)
                .is_some_and(|kind| kind == FIELD_METADATA_VALUE_KIND_INDEX);
            if is_index {
                chunk = chunk.with_index(IndexColumn::from_arrow(field.name(), array.as_ref())?)?;
                continue;
            }

            let descriptor = ComponentDescriptor::from_metadata(field.metadata())?;
            let list_array = array
                .as_list_opt::<i32>()
                .ok_or_else(|| DeserializationError::NotAList {
                    name: field.name().clone(),
                    actual: array.data_type().clone(),
                })?
                .clone();
            chunk = chunk.with_column(SerializedComponentColumn::new(list_array, descriptor))?;
        }
        Ok(chunk)
    }

    /// Encodes the chunk as an Arrow IPC stream.
    ///
    /// Chunks taller than [`ChunkOption::max_rows_per_message`] are written as
    /// several record batch messages.
    pub fn encode(&self, option: &ChunkOption) -> ChunkResult<Vec<u8>> {
        let batch = self.to_record_batch()?;
        let write_options =
            IpcWriteOptions::try_new(option.alignment, false, MetadataVersion::V5)?;

        let num_rows = batch.num_rows();
        let mut num_messages = 0usize;
        let mut buffer = Vec::new();
        {
            let mut writer =
                StreamWriter::try_new_with_options(&mut buffer, &batch.schema(), write_options)?;
            let mut offset = 0;
            while offset < num_rows {
                let len = (num_rows - offset).min(option.max_rows_per_message);
                writer.write(&compact_rows(&batch, offset, len)?)?;
                offset += len;
                num_messages += 1;
            }
            writer.finish()?;
        }

        log_debug!(
            component = "chunk",
            event = "chunk_encoded",
            entity_path = %self.entity_path,
            num_rows,
            num_messages,
            num_bytes = buffer.len(),
        );
        Ok(buffer)
    }

    /// Decodes a chunk written by [`ColumnChunk::encode`].
    pub fn decode(bytes: &[u8]) -> ChunkResult<Self> {
        let reader = StreamReader::try_new(Cursor::new(bytes), None)?;
        let schema = reader.schema();
        let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
        let batch = concat_batches(&schema, &batches)?;
        let chunk = Self::from_record_batch(&batch)?;

        log_debug!(
            component = "chunk",
            event = "chunk_decoded",
            entity_path = %chunk.entity_path,
            num_rows = chunk.num_rows(),
            num_messages = batches.len(),
        );
        Ok(chunk)
    }
}

/// Copies rows `offset..offset + len` into arrays that start at offset zero.
///
/// The IPC writer does not honour the offset of fixed-size list values nested
/// in a list, so sliced or repartitioned columns are written from copies.
fn compact_rows(
    batch: &RecordBatch,
    offset: usize,
    len: usize,
) -> Result<RecordBatch, ArrowError> {
    if batch.num_columns() == 0 {
        return Ok(batch.slice(offset, len));
    }
    let start = u32::try_from(offset)
        .map_err(|_| ArrowError::InvalidArgumentError(format!("row {offset} out of u32 range")))?;
    let end = u32::try_from(offset + len).map_err(|_| {
        ArrowError::InvalidArgumentError(format!("row {} out of u32 range", offset + len))
    })?;
    take_record_batch(batch, &UInt32Array::from_iter_values(start..end))
}
