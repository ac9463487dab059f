use arrow::{
    array::{new_empty_array, Array, ArrayRef},
    datatypes::DataType,
};

use crate::{
    descriptor::ComponentType,
    error::{DeserializationResult, SerializationResult},
};

/// A value type with a fixed Arrow representation.
///
/// `to_arrow` of `n` values must produce an array of length `n` whose datatype
/// is exactly [`Loggable::arrow_datatype`]; `from_arrow` is its inverse.
pub trait Loggable: Clone + Sized + Send + Sync + 'static {
    fn arrow_datatype() -> DataType;

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef>;

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>>;

    /// A zero-length array of this type, used to clear a field.
    #[inline]
    fn arrow_empty() -> ArrayRef {
        new_empty_array(&Self::arrow_datatype())
    }
}

/// A [`Loggable`] with a canonical, wire-stable name.
pub trait Component: Loggable {
    fn component_type() -> ComponentType;
}

/// Declares a component newtype that delegates its Arrow representation to a datatype.
macro_rules! delegate_component {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $component_type:literal
    ) => {
        $(#[$meta])*
        pub struct $name(pub $inner);

        impl $crate::loggable::Loggable for $name {
            #[inline]
            fn arrow_datatype() -> ::arrow::datatypes::DataType {
                <$inner as $crate::loggable::Loggable>::arrow_datatype()
            }

            fn to_arrow(
                data: &[Self],
            ) -> $crate::error::SerializationResult<::arrow::array::ArrayRef> {
                let inner: Vec<$inner> = data.iter().map(|datum| datum.0.clone()).collect();
                <$inner as $crate::loggable::Loggable>::to_arrow(&inner)
            }

            fn from_arrow(
                array: &dyn ::arrow::array::Array,
            ) -> $crate::error::DeserializationResult<Vec<Self>> {
                Ok(<$inner as $crate::loggable::Loggable>::from_arrow(array)?
                    .into_iter()
                    .map(Self)
                    .collect())
            }
        }

        impl $crate::loggable::Component for $name {
            #[inline]
            fn component_type() -> $crate::descriptor::ComponentType {
                $crate::descriptor::ComponentType::new($component_type)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(inner: $inner) -> Self {
                Self(inner)
            }
        }
    };
}

/// Implements `Loggable` for a `#[repr(u8)]` enum, stored as `UInt8`.
macro_rules! impl_u8_enum {
    ($name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[inline]
            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::loggable::Loggable for $name {
            #[inline]
            fn arrow_datatype() -> ::arrow::datatypes::DataType {
                ::arrow::datatypes::DataType::UInt8
            }

            fn to_arrow(
                data: &[Self],
            ) -> $crate::error::SerializationResult<::arrow::array::ArrayRef> {
                Ok($crate::datatypes::primitive_to_arrow::<::arrow::datatypes::UInt8Type>(
                    data.iter().map(|datum| *datum as u8),
                ))
            }

            fn from_arrow(
                array: &dyn ::arrow::array::Array,
            ) -> $crate::error::DeserializationResult<Vec<Self>> {
                $crate::datatypes::primitive_from_arrow::<::arrow::datatypes::UInt8Type>(array)?
                    .into_iter()
                    .map(|value| {
                        Self::from_u8(value).ok_or(
                            $crate::error::DeserializationError::InvalidEnumValue {
                                type_name: stringify!($name),
                                value,
                            },
                        )
                    })
                    .collect()
            }
        }
    };
}

pub(crate) use delegate_component;
pub(crate) use impl_u8_enum;
