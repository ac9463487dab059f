use std::{borrow::Cow, collections::HashMap};

use arrow::array::{Array, ArrayRef};

use crate::{
    batch::SerializedComponentBatch,
    column::SerializedComponentColumn,
    descriptor::{ArchetypeName, ComponentDescriptor},
    error::{DeserializationError, DeserializationResult, SerializationError, SerializationResult},
    loggable::Component,
    observability::log_warn,
};

/// Anything that can be turned into a list of component batches.
pub trait AsComponents {
    /// The batches of every set field, in declaration order.
    ///
    /// Unset fields are skipped; nothing is defaulted or reordered.
    fn as_serialized_batches(&self) -> Vec<SerializedComponentBatch>;

    /// Partitions every set field with the same `lengths`.
    ///
    /// Either every field partitions or the whole call fails.
    fn columns<I>(&self, lengths: I) -> SerializationResult<Vec<SerializedComponentColumn>>
    where
        I: IntoIterator<Item = usize> + Clone,
    {
        self.as_serialized_batches()
            .into_iter()
            .map(|batch| batch.partitioned(lengths.clone()))
            .collect()
    }

    /// Partitions every set field into unit-length sub-batches.
    ///
    /// The row count is taken from the first set field; every other set field
    /// must have the same length.
    fn columns_of_unit_batches(&self) -> SerializationResult<Vec<SerializedComponentColumn>> {
        let batches = self.as_serialized_batches();
        let len = batches.first().map_or(0, SerializedComponentBatch::len);
        batches
            .into_iter()
            .map(|batch| batch.partitioned(std::iter::repeat(1).take(len)))
            .collect()
    }

    fn heap_size_bytes(&self) -> u64 {
        self.as_serialized_batches()
            .iter()
            .map(SerializedComponentBatch::heap_size_bytes)
            .sum()
    }
}

/// A named, closed set of optional fields.
pub trait Archetype: AsComponents + Default + Clone + Sized {
    fn name() -> ArchetypeName;

    /// Human-readable name, e.g. `"Mesh 3D"`.
    fn display_name() -> &'static str;

    fn required_components() -> Cow<'static, [ComponentDescriptor]>;

    fn recommended_components() -> Cow<'static, [ComponentDescriptor]>;

    fn optional_components() -> Cow<'static, [ComponentDescriptor]>;

    /// Every field, in declaration order.
    fn all_components() -> Cow<'static, [ComponentDescriptor]>;

    /// Rebuilds the archetype from `(descriptor, array)` pairs.
    ///
    /// Pairs whose descriptor is not a field of this archetype are ignored.
    /// A known field whose array does not have the field component's datatype
    /// fails the whole call.
    fn from_arrow_components(
        arrow_data: impl IntoIterator<Item = (ComponentDescriptor, ArrayRef)>,
    ) -> DeserializationResult<Self>;

    /// Continues editing this record through a fallible builder.
    #[inline]
    fn into_builder(self) -> ArchetypeBuilder<Self> {
        ArchetypeBuilder::new(self)
    }
}

/// Fluent, fallible assembly of an archetype.
///
/// Every `with_*` setter replaces its slot. The first serialization failure is
/// kept and later setters become no-ops; [`ArchetypeBuilder::build`] returns
/// that failure instead of a partially built record.
#[derive(Debug)]
pub struct ArchetypeBuilder<A> {
    archetype: A,
    error: Option<SerializationError>,
}

impl<A> ArchetypeBuilder<A>
where
    A: Archetype,
{
    #[inline]
    pub fn new(archetype: A) -> Self {
        Self {
            archetype,
            error: None,
        }
    }

    pub(crate) fn with_field<C>(
        mut self,
        descriptor: ComponentDescriptor,
        values: impl IntoIterator<Item = impl Into<C>>,
        slot: impl FnOnce(&mut A) -> &mut Option<SerializedComponentBatch>,
    ) -> Self
    where
        C: Component,
    {
        if self.error.is_some() {
            return self;
        }
        match SerializedComponentBatch::try_from_loggable::<C>(values, descriptor) {
            Ok(batch) => *slot(&mut self.archetype) = Some(batch),
            Err(err) => {
                log_warn!(
                    component = "builder",
                    event = "serialize_field_failed",
                    archetype = %A::name(),
                    error = %err,
                );
                self.error = Some(err);
            }
        }
        self
    }

    /// The first failure recorded so far, if any.
    #[inline]
    pub fn error(&self) -> Option<&SerializationError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn build(self) -> SerializationResult<A> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.archetype),
        }
    }
}

impl<A> From<A> for ArchetypeBuilder<A>
where
    A: Archetype,
{
    #[inline]
    fn from(archetype: A) -> Self {
        Self::new(archetype)
    }
}

/// Indexes `(descriptor, array)` pairs for lookup by field.
pub(crate) fn arrays_by_descriptor(
    arrow_data: impl IntoIterator<Item = (ComponentDescriptor, ArrayRef)>,
) -> HashMap<ComponentDescriptor, ArrayRef> {
    arrow_data.into_iter().collect()
}

/// Picks the array of one field, checking it against component `C`.
pub(crate) fn deserialize_field<C>(
    arrays: &HashMap<ComponentDescriptor, ArrayRef>,
    descriptor: ComponentDescriptor,
) -> DeserializationResult<Option<SerializedComponentBatch>>
where
    C: Component,
{
    let Some(array) = arrays.get(&descriptor) else {
        return Ok(None);
    };
    let expected = C::arrow_datatype();
    if array.data_type() != &expected {
        return Err(DeserializationError::datatype_mismatch(
            expected,
            array.data_type(),
        ));
    }
    Ok(Some(SerializedComponentBatch::new(array.clone(), descriptor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        archetypes::Mesh3D,
        components::{ClassId, Color, Position3D},
    };

    #[test]
    fn builder_keeps_the_first_error() {
        let builder = Mesh3D::new([[0.0, 0.0, 0.0]])
            .with_field::<Color>(Mesh3D::descriptor_class_ids(), [0xFFFFFFFF_u32], |mesh| {
                &mut mesh.class_ids
            })
            .with_field::<ClassId>(Mesh3D::descriptor_vertex_colors(), [1u16], |mesh| {
                &mut mesh.vertex_colors
            })
            .with_class_ids([1u16]);

        match builder.error() {
            Some(SerializationError::TypeMismatch { descriptor, .. }) => {
                assert_eq!(descriptor, &Mesh3D::descriptor_class_ids());
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert!(matches!(
            builder.build(),
            Err(SerializationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn into_builder_continues_a_record() {
        let mesh = Mesh3D::update_fields()
            .into_builder()
            .with_class_ids([4u16, 5])
            .build()
            .unwrap();
        assert!(mesh.vertex_positions.is_none());
        assert_eq!(mesh.as_serialized_batches().len(), 1);
    }

    #[test]
    fn columns_apply_the_same_lengths_to_every_field() {
        let mesh = Mesh3D::new([[0.0, 0.0, 0.0]; 4])
            .with_class_ids([1u16, 2, 3, 4])
            .build()
            .unwrap();
        let columns = mesh.columns([1, 3]).unwrap();
        assert_eq!(columns.len(), 2);
        for column in &columns {
            assert_eq!(column.lengths().collect::<Vec<_>>(), vec![1, 3]);
        }
    }

    #[test]
    fn columns_fail_as_a_whole() {
        let mesh = Mesh3D::new([[0.0, 0.0, 0.0]; 4])
            .with_class_ids([1u16, 2])
            .build()
            .unwrap();
        assert!(matches!(
            mesh.columns([2, 2]),
            Err(SerializationError::LengthMismatch { len: 2, sum: 4, .. })
        ));
        assert!(mesh.columns_of_unit_batches().is_err());
    }

    #[test]
    fn unit_columns_of_a_record() {
        let mesh = Mesh3D::new([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]])
            .build()
            .unwrap();
        let columns = mesh.columns_of_unit_batches().unwrap();
        assert_eq!(columns.len(), 1);
        let positions: Vec<Vec<Position3D>> = columns[0]
            .iter_sub_batches()
            .map(|batch| batch.to_components::<Position3D>().unwrap())
            .collect();
        assert_eq!(
            positions,
            vec![
                vec![Position3D::new(0.0, 0.0, 0.0)],
                vec![Position3D::new(1.0, 0.0, 0.0)],
                vec![Position3D::new(2.0, 0.0, 0.0)],
            ]
        );
        assert!(mesh.heap_size_bytes() > 0);
    }
}
