use arrow::{
    array::{Array, ArrayRef},
    datatypes::{DataType, UInt8Type},
};

use crate::{
    datatypes::{fixed_size_from_arrow, fixed_size_list_datatype, fixed_size_to_arrow},
    descriptor::ComponentType,
    error::{DeserializationError, DeserializationResult, SerializationResult},
    loggable::{impl_u8_enum, Component, Loggable},
};

/// A direction along one of the three principal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ViewDir {
    Up = 1,
    Down = 2,
    Right = 3,
    Left = 4,
    Forward = 5,
    Back = 6,
}

impl_u8_enum!(ViewDir {
    Up = 1,
    Down = 2,
    Right = 3,
    Left = 4,
    Forward = 5,
    Back = 6,
});

impl ViewDir {
    /// Which principal axis this direction lies on; opposite directions share one.
    #[inline]
    fn axis(self) -> u8 {
        (self as u8 - 1) / 2
    }
}

/// **Component**: How we interpret the coordinate system of an entity/space.
///
/// Holds the directions of the `[x, y, z]` axes, e.g. `RDF` means x points
/// right, y points down and z points forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewCoordinates(pub [ViewDir; 3]);

impl ViewCoordinates {
    pub const RDF: Self = Self([ViewDir::Right, ViewDir::Down, ViewDir::Forward]);
    pub const RUB: Self = Self([ViewDir::Right, ViewDir::Up, ViewDir::Back]);
    pub const FLU: Self = Self([ViewDir::Forward, ViewDir::Left, ViewDir::Up]);
    pub const RFU: Self = Self([ViewDir::Right, ViewDir::Forward, ViewDir::Up]);
    pub const LFU: Self = Self([ViewDir::Left, ViewDir::Forward, ViewDir::Up]);

    #[inline]
    pub const fn new(x: ViewDir, y: ViewDir, z: ViewDir) -> Self {
        Self([x, y, z])
    }

    /// Whether the three directions span all three principal axes.
    pub fn is_valid(&self) -> bool {
        let [x, y, z] = self.0.map(ViewDir::axis);
        x != y && y != z && x != z
    }
}

impl Loggable for ViewCoordinates {
    #[inline]
    fn arrow_datatype() -> DataType {
        fixed_size_list_datatype::<UInt8Type>(3)
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        fixed_size_to_arrow::<UInt8Type, 3>(data.iter().map(|coords| coords.0.map(|dir| dir as u8)))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        fixed_size_from_arrow::<UInt8Type, 3>(array)?
            .into_iter()
            .map(|raw| {
                let mut dirs = [ViewDir::Up; 3];
                for (dir, value) in dirs.iter_mut().zip(raw) {
                    *dir = ViewDir::from_u8(value).ok_or(
                        DeserializationError::InvalidEnumValue {
                            type_name: "ViewDir",
                            value,
                        },
                    )?;
                }
                Ok(Self(dirs))
            })
            .collect()
    }
}

impl Component for ViewCoordinates {
    #[inline]
    fn component_type() -> ComponentType {
        ComponentType::new("rerun.components.ViewCoordinates")
    }
}

impl From<[ViewDir; 3]> for ViewCoordinates {
    #[inline]
    fn from(dirs: [ViewDir; 3]) -> Self {
        Self(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for coords in [
            ViewCoordinates::RDF,
            ViewCoordinates::RUB,
            ViewCoordinates::FLU,
            ViewCoordinates::RFU,
            ViewCoordinates::LFU,
        ] {
            assert!(coords.is_valid(), "{coords:?}");
        }
        assert!(!ViewCoordinates::new(ViewDir::Up, ViewDir::Down, ViewDir::Left).is_valid());
    }

    #[test]
    fn stored_as_three_bytes() {
        let array = ViewCoordinates::to_arrow(&[ViewCoordinates::RDF]).unwrap();
        assert_eq!(array.data_type(), &ViewCoordinates::arrow_datatype());
        assert_eq!(
            ViewCoordinates::from_arrow(array.as_ref()).unwrap(),
            vec![ViewCoordinates::RDF]
        );
    }
}
