use crate::{
    datatypes,
    descriptor::ComponentType,
    loggable::{delegate_component, impl_u8_enum, Component},
};

/// **Component**: The kind of a blueprint container (tabs, grid, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ContainerKind {
    /// Put children in separate tabs.
    Tabs = 1,

    /// Order the children left to right.
    Horizontal = 2,

    /// Order the children top to bottom.
    Vertical = 3,

    /// Organize children in a grid layout.
    #[default]
    Grid = 4,
}

impl_u8_enum!(ContainerKind {
    Tabs = 1,
    Horizontal = 2,
    Vertical = 3,
    Grid = 4,
});

impl Component for ContainerKind {
    #[inline]
    fn component_type() -> ComponentType {
        ComponentType::new("rerun.blueprint.components.ContainerKind")
    }
}

delegate_component!(
    /// **Component**: All the contents in the container, as container or view ids.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    IncludedContent(datatypes::Utf8) => "rerun.blueprint.components.IncludedContent"
);

delegate_component!(
    /// **Component**: The layout share of a column in the container.
    #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
    ColumnShare(datatypes::Float32) => "rerun.blueprint.components.ColumnShare"
);

delegate_component!(
    /// **Component**: The layout share of a row in the container.
    #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
    RowShare(datatypes::Float32) => "rerun.blueprint.components.RowShare"
);

delegate_component!(
    /// **Component**: The active tab in a tabbed container.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    ActiveTab(datatypes::Utf8) => "rerun.blueprint.components.ActiveTab"
);

delegate_component!(
    /// **Component**: How many columns a grid container should have.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    GridColumns(datatypes::UInt32) => "rerun.blueprint.components.GridColumns"
);

macro_rules! impl_from_str {
    ($($name:ident),+ $(,)?) => {
        $(
            impl From<&str> for $name {
                #[inline]
                fn from(value: &str) -> Self {
                    Self(value.into())
                }
            }

            impl From<String> for $name {
                #[inline]
                fn from(value: String) -> Self {
                    Self(value.into())
                }
            }
        )+
    };
}

impl_from_str!(IncludedContent, ActiveTab);

impl From<f32> for ColumnShare {
    #[inline]
    fn from(share: f32) -> Self {
        Self(datatypes::Float32(share))
    }
}

impl From<f32> for RowShare {
    #[inline]
    fn from(share: f32) -> Self {
        Self(datatypes::Float32(share))
    }
}

impl From<u32> for GridColumns {
    #[inline]
    fn from(columns: u32) -> Self {
        Self(datatypes::UInt32(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggable::Loggable;

    #[test]
    fn blueprint_components_live_in_their_own_namespace() {
        assert_eq!(
            ContainerKind::component_type().as_str(),
            "rerun.blueprint.components.ContainerKind"
        );
        assert_eq!(
            ActiveTab::component_type().as_str(),
            "rerun.blueprint.components.ActiveTab"
        );
    }

    #[test]
    fn grid_columns_round_trip() {
        let values = [GridColumns::from(2), GridColumns::from(5)];
        let array = GridColumns::to_arrow(&values).unwrap();
        assert_eq!(GridColumns::from_arrow(array.as_ref()).unwrap(), values);
    }
}
