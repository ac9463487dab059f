use std::borrow::Cow;

use arrow::array::ArrayRef;
use once_cell::sync::Lazy;

use crate::{
    archetype::{
        arrays_by_descriptor, deserialize_field, Archetype, ArchetypeBuilder, AsComponents,
    },
    batch::SerializedComponentBatch,
    blueprint::components::{
        ActiveTab, ColumnShare, ContainerKind, GridColumns, IncludedContent, RowShare,
    },
    components::{Name, Visible},
    descriptor::{ArchetypeName, ComponentDescriptor},
    error::DeserializationResult,
};

const ARCHETYPE_NAME: &str = "rerun.blueprint.archetypes.ContainerBlueprint";

/// **Archetype**: The description of a container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerBlueprint {
    /// The kind of container.
    pub container_kind: Option<SerializedComponentBatch>,

    /// The name of the container.
    pub display_name: Option<SerializedComponentBatch>,

    /// Container or view ids that are children of this container.
    pub contents: Option<SerializedComponentBatch>,

    /// The layout shares of each column in the container.
    ///
    /// For horizontal containers the length should match the number of
    /// contents. Ignored for vertical containers.
    pub col_shares: Option<SerializedComponentBatch>,

    /// The layout shares of each row of the container.
    ///
    /// For vertical containers the length should match the number of
    /// contents. Ignored for horizontal containers.
    pub row_shares: Option<SerializedComponentBatch>,

    /// Which tab is active. Only applies to tab containers.
    pub active_tab: Option<SerializedComponentBatch>,

    /// Whether this container is visible; true if unset.
    pub visible: Option<SerializedComponentBatch>,

    /// How many columns a grid should have; automatic if unset.
    pub grid_columns: Option<SerializedComponentBatch>,
}

impl ContainerBlueprint {
    pub const NUM_COMPONENTS: usize = 8;

    #[inline]
    pub const fn descriptor_container_kind() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:container_kind",
            "rerun.blueprint.components.ContainerKind",
        )
    }

    #[inline]
    pub const fn descriptor_display_name() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:display_name",
            "rerun.components.Name",
        )
    }

    #[inline]
    pub const fn descriptor_contents() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:contents",
            "rerun.blueprint.components.IncludedContent",
        )
    }

    #[inline]
    pub const fn descriptor_col_shares() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:col_shares",
            "rerun.blueprint.components.ColumnShare",
        )
    }

    #[inline]
    pub const fn descriptor_row_shares() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:row_shares",
            "rerun.blueprint.components.RowShare",
        )
    }

    #[inline]
    pub const fn descriptor_active_tab() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:active_tab",
            "rerun.blueprint.components.ActiveTab",
        )
    }

    #[inline]
    pub const fn descriptor_visible() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:visible",
            "rerun.components.Visible",
        )
    }

    #[inline]
    pub const fn descriptor_grid_columns() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ARCHETYPE_NAME,
            "ContainerBlueprint:grid_columns",
            "rerun.blueprint.components.GridColumns",
        )
    }
}

static REQUIRED_COMPONENTS: Lazy<[ComponentDescriptor; 1]> =
    Lazy::new(|| [ContainerBlueprint::descriptor_container_kind()]);

static RECOMMENDED_COMPONENTS: Lazy<[ComponentDescriptor; 0]> = Lazy::new(|| []);

static OPTIONAL_COMPONENTS: Lazy<[ComponentDescriptor; 7]> = Lazy::new(|| {
    [
        ContainerBlueprint::descriptor_display_name(),
        ContainerBlueprint::descriptor_contents(),
        ContainerBlueprint::descriptor_col_shares(),
        ContainerBlueprint::descriptor_row_shares(),
        ContainerBlueprint::descriptor_active_tab(),
        ContainerBlueprint::descriptor_visible(),
        ContainerBlueprint::descriptor_grid_columns(),
    ]
});

static ALL_COMPONENTS: Lazy<[ComponentDescriptor; ContainerBlueprint::NUM_COMPONENTS]> =
    Lazy::new(|| {
        [
            ContainerBlueprint::descriptor_container_kind(),
            ContainerBlueprint::descriptor_display_name(),
            ContainerBlueprint::descriptor_contents(),
            ContainerBlueprint::descriptor_col_shares(),
            ContainerBlueprint::descriptor_row_shares(),
            ContainerBlueprint::descriptor_active_tab(),
            ContainerBlueprint::descriptor_visible(),
            ContainerBlueprint::descriptor_grid_columns(),
        ]
    });

impl ContainerBlueprint {
    #[inline]
    pub fn new(container_kind: impl Into<ContainerKind>) -> ArchetypeBuilder<Self> {
        Self::default()
            .into_builder()
            .with_container_kind(container_kind)
    }

    #[inline]
    pub fn update_fields() -> Self {
        Self::default()
    }

    pub fn clear_fields() -> Self {
        Self {
            container_kind: Some(SerializedComponentBatch::empty::<ContainerKind>(
                Self::descriptor_container_kind(),
            )),
            display_name: Some(SerializedComponentBatch::empty::<Name>(
                Self::descriptor_display_name(),
            )),
            contents: Some(SerializedComponentBatch::empty::<IncludedContent>(
                Self::descriptor_contents(),
            )),
            col_shares: Some(SerializedComponentBatch::empty::<ColumnShare>(
                Self::descriptor_col_shares(),
            )),
            row_shares: Some(SerializedComponentBatch::empty::<RowShare>(
                Self::descriptor_row_shares(),
            )),
            active_tab: Some(SerializedComponentBatch::empty::<ActiveTab>(
                Self::descriptor_active_tab(),
            )),
            visible: Some(SerializedComponentBatch::empty::<Visible>(
                Self::descriptor_visible(),
            )),
            grid_columns: Some(SerializedComponentBatch::empty::<GridColumns>(
                Self::descriptor_grid_columns(),
            )),
        }
    }
}

impl ArchetypeBuilder<ContainerBlueprint> {
    #[inline]
    pub fn with_container_kind(self, container_kind: impl Into<ContainerKind>) -> Self {
        self.with_many_container_kind([container_kind])
    }

    #[inline]
    pub fn with_many_container_kind(
        self,
        container_kind: impl IntoIterator<Item = impl Into<ContainerKind>>,
    ) -> Self {
        self.with_field::<ContainerKind>(
            ContainerBlueprint::descriptor_container_kind(),
            container_kind,
            |container| &mut container.container_kind,
        )
    }

    #[inline]
    pub fn with_display_name(self, display_name: impl Into<Name>) -> Self {
        self.with_many_display_name([display_name])
    }

    #[inline]
    pub fn with_many_display_name(
        self,
        display_name: impl IntoIterator<Item = impl Into<Name>>,
    ) -> Self {
        self.with_field::<Name>(
            ContainerBlueprint::descriptor_display_name(),
            display_name,
            |container| &mut container.display_name,
        )
    }

    #[inline]
    pub fn with_contents(
        self,
        contents: impl IntoIterator<Item = impl Into<IncludedContent>>,
    ) -> Self {
        self.with_field::<IncludedContent>(
            ContainerBlueprint::descriptor_contents(),
            contents,
            |container| &mut container.contents,
        )
    }

    #[inline]
    pub fn with_col_shares(
        self,
        col_shares: impl IntoIterator<Item = impl Into<ColumnShare>>,
    ) -> Self {
        self.with_field::<ColumnShare>(
            ContainerBlueprint::descriptor_col_shares(),
            col_shares,
            |container| &mut container.col_shares,
        )
    }

    #[inline]
    pub fn with_row_shares(
        self,
        row_shares: impl IntoIterator<Item = impl Into<RowShare>>,
    ) -> Self {
        self.with_field::<RowShare>(
            ContainerBlueprint::descriptor_row_shares(),
            row_shares,
            |container| &mut container.row_shares,
        )
    }

    #[inline]
    pub fn with_active_tab(self, active_tab: impl Into<ActiveTab>) -> Self {
        self.with_many_active_tab([active_tab])
    }

    #[inline]
    pub fn with_many_active_tab(
        self,
        active_tab: impl IntoIterator<Item = impl Into<ActiveTab>>,
    ) -> Self {
        self.with_field::<ActiveTab>(
            ContainerBlueprint::descriptor_active_tab(),
            active_tab,
            |container| &mut container.active_tab,
        )
    }

    #[inline]
    pub fn with_visible(self, visible: impl Into<Visible>) -> Self {
        self.with_many_visible([visible])
    }

    #[inline]
    pub fn with_many_visible(self, visible: impl IntoIterator<Item = impl Into<Visible>>) -> Self {
        self.with_field::<Visible>(
            ContainerBlueprint::descriptor_visible(),
            visible,
            |container| &mut container.visible,
        )
    }

    #[inline]
    pub fn with_grid_columns(self, grid_columns: impl Into<GridColumns>) -> Self {
        self.with_many_grid_columns([grid_columns])
    }

    #[inline]
    pub fn with_many_grid_columns(
        self,
        grid_columns: impl IntoIterator<Item = impl Into<GridColumns>>,
    ) -> Self {
        self.with_field::<GridColumns>(
            ContainerBlueprint::descriptor_grid_columns(),
            grid_columns,
            |container| &mut container.grid_columns,
        )
    }
}

impl AsComponents for ContainerBlueprint {
    fn as_serialized_batches(&self) -> Vec<SerializedComponentBatch> {
        [
            &self.container_kind,
            &self.display_name,
            &self.contents,
            &self.col_shares,
            &self.row_shares,
            &self.active_tab,
            &self.visible,
            &self.grid_columns,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

impl Archetype for ContainerBlueprint {
    #[inline]
    fn name() -> ArchetypeName {
        ArchetypeName::new(ARCHETYPE_NAME)
    }

    #[inline]
    fn display_name() -> &'static str {
        "Container blueprint"
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
            container_kind: deserialize_field::<ContainerKind>(
                &arrays,
                Self::descriptor_container_kind(),
            )?,
            display_name: deserialize_field::<Name>(&arrays, Self::descriptor_display_name())?,
            contents: deserialize_field::<IncludedContent>(&arrays, Self::descriptor_contents())?,
            col_shares: deserialize_field::<ColumnShare>(&arrays, Self::descriptor_col_shares())?,
            row_shares: deserialize_field::<RowShare>(&arrays, Self::descriptor_row_shares())?,
            active_tab: deserialize_field::<ActiveTab>(&arrays, Self::descriptor_active_tab())?,
            visible: deserialize_field::<Visible>(&arrays, Self::descriptor_visible())?,
            grid_columns: deserialize_field::<GridColumns>(
                &arrays,
                Self::descriptor_grid_columns(),
            )?,
        })
    }
}
