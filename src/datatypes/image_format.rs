use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, StructArray, UInt32Array, UInt8Array},
    datatypes::{DataType, Field, Fields, UInt32Type, UInt8Type},
};

use super::primitive_from_arrow;
use crate::{
    error::{DeserializationError, DeserializationResult, SerializationResult},
    loggable::{impl_u8_enum, Loggable},
};

/// Channel layout of an image.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorModel {
    /// Grayscale luminance intensity.
    L = 1,
    RGB = 2,
    RGBA = 3,
    BGR = 4,
    BGRA = 5,
}

impl_u8_enum!(ColorModel {
    L = 1,
    RGB = 2,
    RGBA = 3,
    BGR = 4,
    BGRA = 5,
});

impl ColorModel {
    #[inline]
    pub fn num_channels(self) -> usize {
        match self {
            ColorModel::L => 1,
            ColorModel::RGB | ColorModel::BGR => 3,
            ColorModel::RGBA | ColorModel::BGRA => 4,
        }
    }
}

/// Element type of each channel of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelDatatype {
    U8 = 6,
    I8 = 7,
    U16 = 8,
    I16 = 9,
    U32 = 10,
    I32 = 11,
    U64 = 12,
    I64 = 13,
    F16 = 33,
    F32 = 34,
    F64 = 35,
}

impl_u8_enum!(ChannelDatatype {
    U8 = 6,
    I8 = 7,
    U16 = 8,
    I16 = 9,
    U32 = 10,
    I32 = 11,
    U64 = 12,
    I64 = 13,
    F16 = 33,
    F32 = 34,
    F64 = 35,
});

impl ChannelDatatype {
    #[inline]
    pub fn bits(self) -> usize {
        match self {
            ChannelDatatype::U8 | ChannelDatatype::I8 => 8,
            ChannelDatatype::U16 | ChannelDatatype::I16 | ChannelDatatype::F16 => 16,
            ChannelDatatype::U32 | ChannelDatatype::I32 | ChannelDatatype::F32 => 32,
            ChannelDatatype::U64 | ChannelDatatype::I64 | ChannelDatatype::F64 => 64,
        }
    }
}

/// The metadata describing the contents of an image buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageFormat {
    pub width: u32,
    pub height: u32,
    pub color_model: Option<ColorModel>,
    pub channel_datatype: Option<ChannelDatatype>,
}

impl ImageFormat {
    #[inline]
    pub fn rgb8([width, height]: [u32; 2]) -> Self {
        Self {
            width,
            height,
            color_model: Some(ColorModel::RGB),
            channel_datatype: Some(ChannelDatatype::U8),
        }
    }

    #[inline]
    pub fn rgba8([width, height]: [u32; 2]) -> Self {
        Self {
            width,
            height,
            color_model: Some(ColorModel::RGBA),
            channel_datatype: Some(ChannelDatatype::U8),
        }
    }

    /// Expected buffer size in bytes, if both color model and channel type are known.
    pub fn num_bytes(&self) -> Option<usize> {
        let channels = self.color_model?.num_channels();
        let bits = self.channel_datatype?.bits();
        Some(self.width as usize * self.height as usize * channels * bits / 8)
    }

    fn fields() -> Fields {
        Fields::from(vec![
            Field::new("width", DataType::UInt32, false),
            Field::new("height", DataType::UInt32, false),
            Field::new("color_model", DataType::UInt8, true),
            Field::new("channel_datatype", DataType::UInt8, true),
        ])
    }
}

impl Loggable for ImageFormat {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Struct(Self::fields())
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        let widths = UInt32Array::from_iter_values(data.iter().map(|format| format.width));
        let heights = UInt32Array::from_iter_values(data.iter().map(|format| format.height));
        let color_models: UInt8Array = data
            .iter()
            .map(|format| format.color_model.map(|model| model as u8))
            .collect();
        let channel_datatypes: UInt8Array = data
            .iter()
            .map(|format| format.channel_datatype.map(|datatype| datatype as u8))
            .collect();
        let array = StructArray::try_new(
            Self::fields(),
            vec![
                Arc::new(widths) as ArrayRef,
                Arc::new(heights) as ArrayRef,
                Arc::new(color_models) as ArrayRef,
                Arc::new(channel_datatypes) as ArrayRef,
            ],
            None,
        )?;
        Ok(Arc::new(array))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let expected = Self::arrow_datatype();
        if array.data_type() != &expected {
            return Err(DeserializationError::datatype_mismatch(
                expected,
                array.data_type(),
            ));
        }
        let structs = array.as_struct_opt().ok_or_else(|| {
            DeserializationError::datatype_mismatch(expected.clone(), array.data_type())
        })?;
        if structs.null_count() > 0 {
            return Err(DeserializationError::MissingData(expected));
        }
        // Column order is fixed by the datatype check above.
        let widths = primitive_from_arrow::<UInt32Type>(structs.column(0).as_ref())?;
        let heights = primitive_from_arrow::<UInt32Type>(structs.column(1).as_ref())?;
        let color_models = structs.column(2).as_primitive::<UInt8Type>();
        let channel_datatypes = structs.column(3).as_primitive::<UInt8Type>();

        (0..structs.len())
            .map(|row| {
                Ok(Self {
                    width: widths[row],
                    height: heights[row],
                    color_model: decode_enum(color_models, row, "ColorModel", ColorModel::from_u8)?,
                    channel_datatype: decode_enum(
                        channel_datatypes,
                        row,
                        "ChannelDatatype",
                        ChannelDatatype::from_u8,
                    )?,
                })
            })
            .collect()
    }
}

fn decode_enum<E>(
    values: &UInt8Array,
    row: usize,
    type_name: &'static str,
    from_u8: fn(u8) -> Option<E>,
) -> DeserializationResult<Option<E>> {
    if values.is_null(row) {
        return Ok(None);
    }
    let value = values.value(row);
    from_u8(value)
        .map(Some)
        .ok_or(DeserializationError::InvalidEnumValue { type_name, value })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{StructArray, UInt32Array, UInt8Array};

    use super::*;

    #[test]
    fn optional_fields_survive_round_trip() {
        let formats = vec![
            ImageFormat::rgb8([4, 2]),
            ImageFormat {
                width: 1,
                height: 1,
                color_model: None,
                channel_datatype: Some(ChannelDatatype::F32),
            },
        ];
        let array = ImageFormat::to_arrow(&formats).unwrap();
        assert_eq!(ImageFormat::from_arrow(array.as_ref()).unwrap(), formats);
        assert_eq!(formats[0].num_bytes(), Some(24));
        assert_eq!(formats[1].num_bytes(), None);
    }

    #[test]
    fn unknown_color_model_is_rejected() {
        let array = StructArray::try_new(
            ImageFormat::fields(),
            vec![
                Arc::new(UInt32Array::from(vec![1])) as ArrayRef,
                Arc::new(UInt32Array::from(vec![1])) as ArrayRef,
                Arc::new(UInt8Array::from(vec![Some(99)])) as ArrayRef,
                Arc::new(UInt8Array::from(vec![None::<u8>])) as ArrayRef,
            ],
            None,
        )
        .unwrap();
        let err = ImageFormat::from_arrow(&array).unwrap_err();
        assert!(matches!(
            err,
            DeserializationError::InvalidEnumValue {
                type_name: "ColorModel",
                value: 99
            }
        ));
    }
}
