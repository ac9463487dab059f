use std::borrow::Cow;

use arrow::array::ArrayRef;
use once_cell::sync::Lazy;

use crate::{
    archetype::{
        arrays_by_descriptor, deserialize_field, Archetype, ArchetypeBuilder, AsComponents,
    },
    batch::SerializedComponentBatch,
    components::{
        AxisLength, RotationAxisAngle, RotationQuat, Scale3D, TransformMat3x3, TransformRelation,
        Translation3D,
    },
    descriptor::{ArchetypeName, ComponentDescriptor},
    error::DeserializationResult,
};

const ARCHETYPE_NAME: &str = "rerun.archetypes.Transform3D";

/// **Archetype**: A transform between two 3D spaces, i.e. a pose.
///
/// Every field is optional. Fields are applied in the order translation,
/// rotation (axis-angle, then quaternion), scale, matrix.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform3D {
    /// Translation vector.
    pub translation: Option<SerializedComponentBatch>,

    /// Rotation via axis + angle.
    pub rotation_axis_angle: Option<SerializedComponentBatch>,

    /// Rotation via quaternion.
    pub quaternion: Option<SerializedComponentBatch>,

    /// Scaling factor.
    pub scale: Option<SerializedComponentBatch>,

    /// 3x3 transformation matrix.
    pub mat3x3: Option<SerializedComponentBatch>,

    /// The relation this transform establishes between this entity and its parent.
    pub relation: Option<SerializedComponentBatch>,

    /// Visual length of the 3 axes, in the transform's local coordinate system.
    pub axis_length: Option<SerializedComponentBatch>,
}

impl Transform3D {
    /// The total number of components: 0 required, 0 recommended, 7 optional.
    pub const NUM_COMPONENTS: usize = 7;

    #[inline]
    pub const fn descriptor_translation() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:translation",
            "rerun.components.Translation3D",
        )
    }

    #[inline]
    pub const fn descriptor_rotation_axis_angle() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:rotation_axis_angle",
            "rerun.components.RotationAxisAngle",
        )
    }

    #[inline]
    pub const fn descriptor_quaternion() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:quaternion",
            "rerun.components.RotationQuat",
        )
    }

    #[inline]
    pub const fn descriptor_scale() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:scale",
            "rerun.components.Scale3D",
        )
    }

    #[inline]
    pub const fn descriptor_mat3x3() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:mat3x3",
            "rerun.components.TransformMat3x3",
        )
    }

    #[inline]
    pub const fn descriptor_relation() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:relation",
            "rerun.components.TransformRelation",
        )
    }

    #[inline]
    pub const fn descriptor_axis_length() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "Transform3D:axis_length",
            "rerun.components.AxisLength",
        )
    }
}

static REQUIRED_COMPONENTS: Lazy<[ComponentDescriptor; 0]> = Lazy::new(|| []);

static RECOMMENDED_COMPONENTS: Lazy<[ComponentDescriptor; 0]> = Lazy::new(|| []);

static OPTIONAL_COMPONENTS: Lazy<[ComponentDescriptor; 7]> = Lazy::new(|| {
    [
        Transform3D::descriptor_translation(),
        Transform3D::descriptor_rotation_axis_angle(),
        Transform3D::descriptor_quaternion(),
        Transform3D::descriptor_scale(),
        Transform3D::descriptor_mat3x3(),
        Transform3D::descriptor_relation(),
        Transform3D::descriptor_axis_length(),
    ]
});

static ALL_COMPONENTS: Lazy<[ComponentDescriptor; Transform3D::NUM_COMPONENTS]> =
    Lazy::new(|| {
        [
            Transform3D::descriptor_translation(),
            Transform3D::descriptor_rotation_axis_angle(),
            Transform3D::descriptor_quaternion(),
            Transform3D::descriptor_scale(),
            Transform3D::descriptor_mat3x3(),
            Transform3D::descriptor_relation(),
            Transform3D::descriptor_axis_length(),
        ]
    });

impl Transform3D {
    #[inline]
    pub fn update_fields() -> Self {
        Self::default()
    }

    pub fn clear_fields() -> Self {
        Self {
            translation: Some(SerializedComponentBatch::empty::<Translation3D>(
                Self::descriptor_translation(),
            )),
            rotation_axis_angle: Some(SerializedComponentBatch::empty::<RotationAxisAngle>(
                Self::descriptor_rotation_axis_angle(),
            )),
            quaternion: Some(SerializedComponentBatch::empty::<RotationQuat>(
                Self::descriptor_quaternion(),
            )),
            scale: Some(SerializedComponentBatch::empty::<Scale3D>(
                Self::descriptor_scale(),
            )),
            mat3x3: Some(SerializedComponentBatch::empty::<TransformMat3x3>(
                Self::descriptor_mat3x3(),
            )),
            relation: Some(SerializedComponentBatch::empty::<TransformRelation>(
                Self::descriptor_relation(),
            )),
            axis_length: Some(SerializedComponentBatch::empty::<AxisLength>(
                Self::descriptor_axis_length(),
            )),
        }
    }

    /// A transform that only translates, clearing every other field.
    #[inline]
    pub fn from_translation(translation: impl Into<Translation3D>) -> ArchetypeBuilder<Self> {
        Self::clear_fields().into_builder().with_translation(translation)
    }

    /// A transform that only rotates, clearing every other field.
    #[inline]
    pub fn from_rotation_axis_angle(
        rotation: impl Into<RotationAxisAngle>,
    ) -> ArchetypeBuilder<Self> {
        Self::clear_fields()
            .into_builder()
            .with_rotation_axis_angle(rotation)
    }

    /// A transform that only rotates, clearing every other field.
    #[inline]
    pub fn from_quaternion(quaternion: impl Into<RotationQuat>) -> ArchetypeBuilder<Self> {
        Self::clear_fields().into_builder().with_quaternion(quaternion)
    }

    /// A transform that only scales, clearing every other field.
    #[inline]
    pub fn from_scale(scale: impl Into<Scale3D>) -> ArchetypeBuilder<Self> {
        Self::clear_fields().into_builder().with_scale(scale)
    }

    /// A transform given by a matrix, clearing every other field.
    #[inline]
    pub fn from_mat3x3(mat3x3: impl Into<TransformMat3x3>) -> ArchetypeBuilder<Self> {
        Self::clear_fields().into_builder().with_mat3x3(mat3x3)
    }

    /// The identity transform: every field cleared.
    #[inline]
    pub fn identity() -> Self {
        Self::clear_fields()
    }
}

impl ArchetypeBuilder<Transform3D> {
    #[inline]
    pub fn with_translation(self, translation: impl Into<Translation3D>) -> Self {
        self.with_many_translation([translation])
    }

    #[inline]
    pub fn with_many_translation(
        self,
        translation: impl IntoIterator<Item = impl Into<Translation3D>>,
    ) -> Self {
        self.with_field::<Translation3D>(
            Transform3D::descriptor_translation(),
            translation,
            |transform| &mut transform.translation,
        )
    }

    #[inline]
    pub fn with_rotation_axis_angle(
        self,
        rotation_axis_angle: impl Into<RotationAxisAngle>,
    ) -> Self {
        self.with_many_rotation_axis_angle([rotation_axis_angle])
    }

    #[inline]
    pub fn with_many_rotation_axis_angle(
        self,
        rotation_axis_angle: impl IntoIterator<Item = impl Into<RotationAxisAngle>>,
    ) -> Self {
        self.with_field::<RotationAxisAngle>(
            Transform3D::descriptor_rotation_axis_angle(),
            rotation_axis_angle,
            |transform| &mut transform.rotation_axis_angle,
        )
    }

    #[inline]
    pub fn with_quaternion(self, quaternion: impl Into<RotationQuat>) -> Self {
        self.with_many_quaternion([quaternion])
    }

    #[inline]
    pub fn with_many_quaternion(
        self,
        quaternion: impl IntoIterator<Item = impl Into<RotationQuat>>,
    ) -> Self {
        self.with_field::<RotationQuat>(
            Transform3D::descriptor_quaternion(),
            quaternion,
            |transform| &mut transform.quaternion,
        )
    }

    #[inline]
    pub fn with_scale(self, scale: impl Into<Scale3D>) -> Self {
        self.with_many_scale([scale])
    }

    #[inline]
    pub fn with_many_scale(self, scale: impl IntoIterator<Item = impl Into<Scale3D>>) -> Self {
        self.with_field::<Scale3D>(Transform3D::descriptor_scale(), scale, |transform| {
            &mut transform.scale
        })
    }

    #[inline]
    pub fn with_mat3x3(self, mat3x3: impl Into<TransformMat3x3>) -> Self {
        self.with_many_mat3x3([mat3x3])
    }

    #[inline]
    pub fn with_many_mat3x3(
        self,
        mat3x3: impl IntoIterator<Item = impl Into<TransformMat3x3>>,
    ) -> Self {
        self.with_field::<TransformMat3x3>(
            Transform3D::descriptor_mat3x3(),
            mat3x3,
            |transform| &mut transform.mat3x3,
        )
    }

    #[inline]
    pub fn with_relation(self, relation: impl Into<TransformRelation>) -> Self {
        self.with_many_relation([relation])
    }

    #[inline]
    pub fn with_many_relation(
        self,
        relation: impl IntoIterator<Item = impl Into<TransformRelation>>,
    ) -> Self {
        self.with_field::<TransformRelation>(
            Transform3D::descriptor_relation(),
            relation,
            |transform| &mut transform.relation,
        )
    }

    #[inline]
    pub fn with_axis_length(self, axis_length: impl Into<AxisLength>) -> Self {
        self.with_many_axis_length([axis_length])
    }

    #[inline]
    pub fn with_many_axis_length(
        self,
        axis_length: impl IntoIterator<Item = impl Into<AxisLength>>,
    ) -> Self {
        self.with_field::<AxisLength>(
            Transform3D::descriptor_axis_length(),
            axis_length,
            |transform| &mut transform.axis_length,
        )
    }
}

impl AsComponents for Transform3D {
    fn as_serialized_batches(&self) -> Vec<SerializedComponentBatch> {
        [
            &self.translation,
            &self.rotation_axis_angle,
            &self.quaternion,
            &self.scale,
            &self.mat3x3,
            &self.relation,
            &self.axis_length,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

impl Archetype for Transform3D {
    #[inline]
    fn name() -> ArchetypeName {
        ArchetypeName::new(ARCHETYPE_NAME)
    }

    #[inline]
    fn display_name() -> &'static str {
        "Transform 3D"
    }

    #[inline]
    fn required_components() -> Cow<'static, [ComponentDescriptor]> {
        REQUIRED_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn recommended_components() -> Cow<'static, [ComponentDescriptor]> {
        RECOMMENDED_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn optional_components() -> Cow<'static, [ComponentDescriptor]> {
        OPTIONAL_COMPONENTS.as_slice().into()
    }

    #[inline]
    fn all_components() -> Cow<'static, [ComponentDescriptor]> {
        ALL_COMPONENTS.as_slice().into()
    }

    fn from_arrow_components(
        arrow_data: impl IntoIterator<Item = (ComponentDescriptor, ArrayRef)>,
    ) -> DeserializationResult<Self> {
        let arrays = arrays_by_descriptor(arrow_data);
        Ok(Self {
            translation: deserialize_field::<Translation3D>(
                &arrays,
                Self::descriptor_translation(),
            )?,
            rotation_axis_angle: deserialize_field::<RotationAxisAngle>(
                &arrays,
                Self::descriptor_rotation_axis_angle(),
            )?,
            quaternion: deserialize_field::<RotationQuat>(&arrays, Self::descriptor_quaternion())?,
            scale: deserialize_field::<Scale3D>(&arrays, Self::descriptor_scale())?,
            mat3x3: deserialize_field::<TransformMat3x3>(&arrays, Self::descriptor_mat3x3())?,
            relation: deserialize_field::<TransformRelation>(
                &arrays,
                Self::descriptor_relation(),
            )?,
            axis_length: deserialize_field::<AxisLength>(
                &arrays,
                Self::descriptor_axis_length(),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{self, Angle};

    #[test]
    fn from_translation_clears_everything_else() {
        let transform = Transform3D::from_translation([1.0, 2.0, 3.0]).build().unwrap();
        let batches = transform.as_serialized_batches();
        assert_eq!(batches.len(), Transform3D::NUM_COMPONENTS);
        let (set, cleared): (Vec<_>, Vec<_>) = batches.iter().partition(|b| !b.is_empty());
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].descriptor, Transform3D::descriptor_translation());
        assert_eq!(cleared.len(), Transform3D::NUM_COMPONENTS - 1);
        assert_eq!(
            transform
                .translation
                .unwrap()
                .to_components::<Translation3D>()
                .unwrap(),
            vec![Translation3D::new(1.0, 2.0, 3.0)]
        );
    }

    #[test]
    fn partial_update_only_touches_set_fields() {
        let transform = Transform3D::update_fields()
            .into_builder()
            .with_axis_length(15.0)
            .build()
            .unwrap();
        let batches = transform.as_serialized_batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].descriptor, Transform3D::descriptor_axis_length());
    }

    #[test]
    fn rotation_and_relation_decode() {
        let rotation = datatypes::RotationAxisAngle::new([0.0, 0.0, 1.0], Angle::from_degrees(90.0));
        let transform = Transform3D::update_fields()
            .into_builder()
            .with_rotation_axis_angle(rotation)
            .with_relation(TransformRelation::ChildFromParent)
            .build()
            .unwrap();
        assert_eq!(
            transform
                .relation
                .as_ref()
                .unwrap()
                .to_components::<TransformRelation>()
                .unwrap(),
            vec![TransformRelation::ChildFromParent]
        );
        assert_eq!(
            transform
                .rotation_axis_angle
                .unwrap()
                .to_components::<RotationAxisAngle>()
                .unwrap(),
            vec![RotationAxisAngle(rotation)]
        );
    }

    #[test]
    fn many_translations_form_one_batch() {
        let transform = Transform3D::update_fields()
            .into_builder()
            .with_many_translation([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]])
            .with_many_scale([1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let columns = transform.columns_of_unit_batches().unwrap();
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|column| column.num_rows() == 3));
    }

    #[test]
    fn no_required_components() {
        assert!(Transform3D::required_components().is_empty());
        assert_eq!(Transform3D::optional_components(), Transform3D::all_components());
        assert_eq!(Transform3D::display_name(), "Transform 3D");
    }
}
