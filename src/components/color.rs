use crate::{datatypes, loggable::delegate_component};

delegate_component!(
    /// **Component**: An RGBA color with unmultiplied/separate alpha, in sRGB gamma space.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    Color(datatypes::Rgba32) => "rerun.components.Color"
);

delegate_component!(
    /// **Component**: A color multiplier, usually applied to a whole entity, e.g. a mesh.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    AlbedoFactor(datatypes::Rgba32) => "rerun.components.AlbedoFactor"
);

delegate_component!(
    /// **Component**: A 16-bit ID representing a type of semantic class.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    ClassId(datatypes::UInt16) => "rerun.components.ClassId"
);

impl Color {
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(datatypes::Rgba32::from_rgb(r, g, b))
    }

    #[inline]
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(datatypes::Rgba32::from_unmultiplied_rgba(r, g, b, a))
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(rgba: u32) -> Self {
        Self(datatypes::Rgba32(rgba))
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb.into())
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba.into())
    }
}

impl From<u32> for AlbedoFactor {
    #[inline]
    fn from(rgba: u32) -> Self {
        Self(datatypes::Rgba32(rgba))
    }
}

impl From<[u8; 4]> for AlbedoFactor {
    #[inline]
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba.into())
    }
}

impl From<u16> for ClassId {
    #[inline]
    fn from(id: u16) -> Self {
        Self(datatypes::UInt16(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggable::Loggable;

    #[test]
    fn hex_and_channel_constructors_agree() {
        assert_eq!(Color::from(0xFF0000FF), Color::from_rgb(255, 0, 0));
        assert_eq!(Color::from([0, 255, 0, 128]), Color::from_unmultiplied_rgba(0, 255, 0, 128));
    }

    #[test]
    fn class_ids_are_u16() {
        let array = ClassId::to_arrow(&[ClassId::from(7), ClassId::from(65535)]).unwrap();
        assert_eq!(array.data_type(), &arrow::datatypes::DataType::UInt16);
        assert_eq!(
            ClassId::from_arrow(array.as_ref()).unwrap(),
            vec![ClassId::from(7), ClassId::from(65535)]
        );
    }
}
