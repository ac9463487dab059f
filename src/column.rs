use std::sync::Arc;

use arrow::{
    array::{Array, ListArray},
    buffer::OffsetBuffer,
    datatypes::Field,
};

use crate::{
    batch::SerializedComponentBatch,
    descriptor::ComponentDescriptor,
    error::{SerializationError, SerializationResult},
    observability::log_debug,
};

/// A component batch cut into row-aligned sub-batches.
///
/// Backed by a `ListArray` whose values are the original batch's array: row
/// `i` of the list is sub-batch `i`, and no element data is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedComponentColumn {
    pub list_array: ListArray,
    pub descriptor: ComponentDescriptor,
}

impl SerializedComponentColumn {
    #[inline]
    pub fn new(list_array: ListArray, descriptor: ComponentDescriptor) -> Self {
        Self {
            list_array,
            descriptor,
        }
    }

    pub(crate) fn from_batch(
        batch: SerializedComponentBatch,
        lengths: impl IntoIterator<Item = usize>,
    ) -> SerializationResult<Self> {
        let SerializedComponentBatch { array, descriptor } = batch;
        let lengths: Vec<usize> = lengths.into_iter().collect();

        let sum = lengths
            .iter()
            .try_fold(0usize, |acc, len| acc.checked_add(*len))
            .ok_or(SerializationError::OffsetOverflow { len: usize::MAX })?;
        if sum != array.len() {
            log_debug!(
                component = "column",
                event = "partition_length_mismatch",
                descriptor = %descriptor,
                len = array.len(),
                sum,
            );
            return Err(SerializationError::LengthMismatch {
                descriptor,
                len: array.len(),
                sum,
            });
        }
        if i32::try_from(sum).is_err() {
            return Err(SerializationError::OffsetOverflow { len: sum });
        }

        let offsets = OffsetBuffer::<i32>::from_lengths(lengths.iter().copied());
        let field = Arc::new(Field::new_list_field(array.data_type().clone(), true));
        let list_array = ListArray::try_new(field, offsets, array, None)?;

        log_debug!(
            component = "column",
            event = "batch_partitioned",
            descriptor = %descriptor,
            num_rows = list_array.len(),
            num_values = sum,
        );
        Ok(Self::new(list_array, descriptor))
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.list_array.len()
    }

    /// Number of elements in each sub-batch, in row order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.list_array
            .value_offsets()
            .windows(2)
            .map(|w| (w[1] - w[0]) as usize)
    }

    /// The sub-batch at `row`, sharing storage with this column.
    ///
    /// `None` past the last row and for null cells.
    pub fn sub_batch(&self, row: usize) -> Option<SerializedComponentBatch> {
        (row < self.num_rows() && self.list_array.is_valid(row)).then(|| {
            SerializedComponentBatch::new(self.list_array.value(row), self.descriptor.clone())
        })
    }

    pub fn iter_sub_batches(&self) -> impl Iterator<Item = SerializedComponentBatch> + '_ {
        (0..self.num_rows()).filter_map(|row| self.sub_batch(row))
    }

    /// All sub-batches back to back, i.e. the batch this column was cut from.
    pub fn concatenated(&self) -> SerializedComponentBatch {
        let offsets = self.list_array.value_offsets();
        let start = offsets.first().copied().unwrap_or(0) as usize;
        let end = offsets.last().copied().unwrap_or(0) as usize;
        SerializedComponentBatch::new(
            self.list_array.values().slice(start, end - start),
            self.descriptor.clone(),
        )
    }

    /// Re-cuts the same elements along different row boundaries.
    pub fn repartitioned(
        &self,
        lengths: impl IntoIterator<Item = usize>,
    ) -> SerializationResult<Self> {
        self.concatenated().partitioned(lengths)
    }

    /// Arrow field for this column, carrying the descriptor as metadata.
    pub fn field(&self) -> Field {
        Field::new(
            self.descriptor.component.as_str(),
            self.list_array.data_type().clone(),
            self.list_array.null_count() > 0,
        )
        .with_metadata(self.descriptor.to_metadata())
    }

    #[inline]
    pub fn heap_size_bytes(&self) -> u64 {
        self.list_array.get_array_memory_size() as u64
    }
}
