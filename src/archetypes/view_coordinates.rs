use std::borrow::Cow;

use arrow::array::ArrayRef;
use once_cell::sync::Lazy;

use crate::{
    archetype::{
        arrays_by_descriptor, deserialize_field, Archetype, ArchetypeBuilder, AsComponents,
    },
    batch::SerializedComponentBatch,
    components,
    descriptor::{ArchetypeName, ComponentDescriptor},
    error::DeserializationResult,
};

const ARCHETYPE_NAME: &str = "rerun.archetypes.ViewCoordinates";

/// **Archetype**: How we interpret the coordinate system of an entity/space.
///
/// Only affects the view of an entity's space, not its transform.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewCoordinates {
    /// The directions of the `[x, y, z]` axes.
    pub xyz: Option<SerializedComponentBatch>,
}

impl ViewCoordinates {
    pub const NUM_COMPONENTS: usize = 1;

    #[inline]
    pub const fn descriptor_xyz() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ViewCoordinates:xyz",
            "rerun.components.ViewCoordinates",
        )
    }
}

static REQUIRED_COMPONENTS: Lazy<[ComponentDescriptor; 1]> =
    Lazy::new(|| [ViewCoordinates::descriptor_xyz()]);

static RECOMMENDED_COMPONENTS: Lazy<[ComponentDescriptor; 0]> = Lazy::new(|| []);

static OPTIONAL_COMPONENTS: Lazy<[ComponentDescriptor; 0]> = Lazy::new(|| []);

static ALL_COMPONENTS: Lazy<[ComponentDescriptor; ViewCoordinates::NUM_COMPONENTS]> =
    Lazy::new(|| [ViewCoordinates::descriptor_xyz()]);

impl ViewCoordinates {
    #[inline]
    pub fn new(xyz: impl Into<components::ViewCoordinates>) -> ArchetypeBuilder<Self> {
        Self::default().into_builder().with_xyz(xyz)
    }

    #[inline]
    pub fn update_fields() -> Self {
        Self::default()
    }

    pub fn clear_fields() -> Self {
        Self {
            xyz: Some(SerializedComponentBatch::empty::<components::ViewCoordinates>(
                Self::descriptor_xyz(),
            )),
        }
    }
}

impl ArchetypeBuilder<ViewCoordinates> {
    #[inline]
    pub fn with_xyz(self, xyz: impl Into<components::ViewCoordinates>) -> Self {
        self.with_many_xyz([xyz])
    }

    #[inline]
    pub fn with_many_xyz(
        self,
        xyz: impl IntoIterator<Item = impl Into<components::ViewCoordinates>>,
    ) -> Self {
        self.with_field::<components::ViewCoordinates>(
            ViewCoordinates::descriptor_xyz(),
            xyz,
            |view| &mut view.xyz,
        )
    }
}

impl AsComponents for ViewCoordinates {
    fn as_serialized_batches(&self) -> Vec<SerializedComponentBatch> {
        self.xyz.iter().cloned().collect()
    }
}

impl Archetype for ViewCoordinates {
    #[inline]
    fn name() -> ArchetypeName {
        ArchetypeName::new(ARCHETYPE_NAME)
    }

    #[inline]
    fn display_name() -> &'static str {
        "View coordinates"
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
            xyz: deserialize_field::<components::ViewCoordinates>(
                &arrays,
                Self::descriptor_xyz(),
            )?,
        })
    }
}
