use crate::{
    descriptor::ComponentType,
    loggable::{impl_u8_enum, Component},
};

/// **Component**: Specifies relation a spatial transform describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TransformRelation {
    /// The transform describes how to transform into the parent entity's space.
    #[default]
    ParentFromChild = 1,

    /// The transform describes how to transform into the child entity's space.
    ChildFromParent = 2,
}

impl_u8_enum!(TransformRelation {
    ParentFromChild = 1,
    ChildFromParent = 2,
});

impl Component for TransformRelation {
    #[inline]
    fn component_type() -> ComponentType {
        ComponentType::new("rerun.components.TransformRelation")
    }
}
