use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, BooleanArray},
    datatypes::{DataType, Float32Type, UInt16Type, UInt32Type},
};

use super::{primitive_from_arrow, primitive_to_arrow};
use crate::{
    error::{DeserializationError, DeserializationResult, SerializationResult},
    loggable::Loggable,
};

macro_rules! primitive_datatype {
    (
        $(#[$meta:meta])*
        $name:ident($native:ty) as $arrow:ty
    ) => {
        $(#[$meta])*
        pub struct $name(pub $native);

        impl Loggable for $name {
            #[inline]
            fn arrow_datatype() -> DataType {
                <$arrow as ::arrow::datatypes::ArrowPrimitiveType>::DATA_TYPE
            }

            fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
                Ok(primitive_to_arrow::<$arrow>(data.iter().map(|datum| datum.0)))
            }

            fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
                Ok(primitive_from_arrow::<$arrow>(array)?
                    .into_iter()
                    .map(Self)
                    .collect())
            }
        }

        impl From<$native> for $name {
            #[inline]
            fn from(value: $native) -> Self {
                Self(value)
            }
        }
    };
}

primitive_datatype!(
    /// A single-precision float.
    #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
    Float32(f32) as Float32Type
);

primitive_datatype!(
    /// A 16-bit unsigned integer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    UInt16(u16) as UInt16Type
);

primitive_datatype!(
    /// A 32-bit unsigned integer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    UInt32(u32) as UInt32Type
);

primitive_datatype!(
    /// An 8-bit-per-channel sRGB color with separate alpha, packed as `0xRRGGBBAA`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    Rgba32(u32) as UInt32Type
);

impl Rgba32 {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::from_unmultiplied_rgba(0, 0, 0, 0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<[u8; 3]> for Rgba32 {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Rgba32 {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, a)
    }
}

/// A boolean flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bool(pub bool);

impl Loggable for Bool {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Boolean
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(BooleanArray::from(
            data.iter().map(|datum| datum.0).collect::<Vec<_>>(),
        )))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let booleans = array.as_boolean_opt().ok_or_else(|| {
            DeserializationError::datatype_mismatch(DataType::Boolean, array.data_type())
        })?;
        if booleans.null_count() > 0 {
            return Err(DeserializationError::MissingData(DataType::Boolean));
        }
        Ok((0..booleans.len()).map(|i| Self(booleans.value(i))).collect())
    }
}

impl From<bool> for Bool {
    #[inline]
    fn from(value: bool) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, Float32Array};

    use super::*;

    #[test]
    fn rgba_packs_big_endian() {
        let color = Rgba32::from_unmultiplied_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.0, 0x1122_3344);
        assert_eq!(color.to_array(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Rgba32::from([255, 0, 0]).0, 0xFF00_00FF);
    }

    #[test]
    fn bool_round_trip() {
        let array = Bool::to_arrow(&[Bool(true), Bool(false)]).unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(
            Bool::from_arrow(array.as_ref()).unwrap(),
            vec![Bool(true), Bool(false)]
        );
    }

    #[test]
    fn bool_rejects_floats() {
        let floats = Float32Array::from(vec![1.0]);
        assert!(matches!(
            Bool::from_arrow(&floats),
            Err(DeserializationError::DatatypeMismatch { .. })
        ));
    }
}
