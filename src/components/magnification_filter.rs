use crate::{descriptor::ComponentType, loggable::impl_u8_enum, loggable::Component};

/// **Component**: Filter used when magnifying an image/texture such that a single
/// pixel/texel is displayed as multiple pixels on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MagnificationFilter {
    /// Show the nearest pixel value.
    ///
    /// Gives a blocky appearance when zooming in. Default for 2D images.
    #[default]
    Nearest = 1,

    /// Linearly interpolate the nearest neighbors for a smoother look when zooming in.
    ///
    /// Default for mesh rendering.
    Linear = 2,
}

impl_u8_enum!(MagnificationFilter {
    Nearest = 1,
    Linear = 2,
});

impl Component for MagnificationFilter {
    #[inline]
    fn component_type() -> ComponentType {
        ComponentType::new("rerun.components.MagnificationFilter")
    }
}

impl std::fmt::Display for MagnificationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagnificationFilter::Nearest => f.write_str("Nearest"),
            MagnificationFilter::Linear => f.write_str("Linear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, UInt8Array};

    use super::*;
    use crate::{error::DeserializationError, loggable::Loggable};

    #[test]
    fn discriminants_are_the_wire_values() {
        let array = MagnificationFilter::to_arrow(&[
            MagnificationFilter::Linear,
            MagnificationFilter::Nearest,
        ])
        .unwrap();
        let raw = array.as_any().downcast_ref::<UInt8Array>().unwrap();
        assert_eq!(raw.values().to_vec(), vec![2, 1]);
        assert_eq!(MagnificationFilter::ALL.len(), 2);
    }

    #[test]
    fn zero_is_not_a_filter() {
        let raw = UInt8Array::from(vec![1, 0]);
        let err = MagnificationFilter::from_arrow(&raw).unwrap_err();
        assert!(matches!(
            err,
            DeserializationError::InvalidEnumValue {
                type_name: "MagnificationFilter",
                value: 0
            }
        ));
    }
}
