use arrow::array::{Array, ArrayRef};

use crate::{
    column::SerializedComponentColumn,
    descriptor::ComponentDescriptor,
    error::{DeserializationError, DeserializationResult, SerializationError, SerializationResult},
    loggable::Component,
};

/// One field's worth of component data: an Arrow array tagged with the
/// descriptor it was produced for.
///
/// A zero-length array is a legal state distinct from an absent field: it
/// tells the receiver to clear the field.
#[derive(Debug, Clone)]
pub struct SerializedComponentBatch {
    pub array: ArrayRef,
    pub descriptor: ComponentDescriptor,
}

impl PartialEq for SerializedComponentBatch {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.array.as_ref() == other.array.as_ref()
    }
}

impl SerializedComponentBatch {
    #[inline]
    pub fn new(array: ArrayRef, descriptor: ComponentDescriptor) -> Self {
        Self { array, descriptor }
    }

    /// Serializes `values` as component `C`.
    ///
    /// Fails with [`SerializationError::TypeMismatch`] when the descriptor was
    /// declared for a different component type.
    pub fn try_from_loggable<C>(
        values: impl IntoIterator<Item = impl Into<C>>,
        descriptor: ComponentDescriptor,
    ) -> SerializationResult<Self>
    where
        C: Component,
    {
        let provided = C::component_type();
        if descriptor.component_type != provided {
            return Err(SerializationError::TypeMismatch {
                expected: descriptor.component_type.clone(),
                actual: provided,
                descriptor,
            });
        }
        let values: Vec<C> = values.into_iter().map(Into::into).collect();
        let array = C::to_arrow(&values)?;
        debug_assert_eq!(array.len(), values.len());
        Ok(Self::new(array, descriptor))
    }

    /// A zero-length batch of component `C`, used to clear a field.
    #[inline]
    pub fn empty<C>(descriptor: ComponentDescriptor) -> Self
    where
        C: Component,
    {
        debug_assert_eq!(descriptor.component_type, C::component_type());
        Self::new(C::arrow_empty(), descriptor)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    #[inline]
    pub fn heap_size_bytes(&self) -> u64 {
        self.array.get_array_memory_size() as u64
    }

    /// Decodes the batch back into component values.
    pub fn to_components<C>(&self) -> DeserializationResult<Vec<C>>
    where
        C: Component,
    {
        let requested = C::component_type();
        if self.descriptor.component_type != requested {
            return Err(DeserializationError::ComponentMismatch {
                descriptor: self.descriptor.clone(),
                requested,
            });
        }
        C::from_arrow(self.array.as_ref())
    }

    /// Cuts the batch into `lengths.len()` contiguous sub-batches.
    ///
    /// `lengths` must sum to [`Self::len`]. Zero lengths are allowed and yield
    /// empty sub-batches. The sub-batches share this batch's storage.
    #[inline]
    pub fn partitioned(
        self,
        lengths: impl IntoIterator<Item = usize>,
    ) -> SerializationResult<SerializedComponentColumn> {
        SerializedComponentColumn::from_batch(self, lengths)
    }

    /// Same as [`Self::partitioned`] with one element per sub-batch.
    #[inline]
    pub fn partitioned_unit(self) -> SerializationResult<SerializedComponentColumn> {
        let len = self.len();
        self.partitioned(std::iter::repeat(1).take(len))
    }
}

impl From<SerializedComponentBatch> for (ComponentDescriptor, ArrayRef) {
    #[inline]
    fn from(batch: SerializedComponentBatch) -> Self {
        (batch.descriptor, batch.array)
    }
}
