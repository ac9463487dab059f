use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, ListArray, StringArray, UInt8Array},
    buffer::OffsetBuffer,
    datatypes::{DataType, UInt8Type},
};

use super::{list_item_field, primitive_from_arrow};
use crate::{
    error::{DeserializationError, DeserializationResult, SerializationError, SerializationResult},
    loggable::Loggable,
};

/// A UTF-8 string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Utf8(pub String);

impl Utf8 {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Loggable for Utf8 {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Utf8
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(StringArray::from_iter_values(
            data.iter().map(Utf8::as_str),
        )))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let strings = array.as_string_opt::<i32>().ok_or_else(|| {
            DeserializationError::datatype_mismatch(DataType::Utf8, array.data_type())
        })?;
        if strings.null_count() > 0 {
            return Err(DeserializationError::MissingData(DataType::Utf8));
        }
        Ok((0..strings.len())
            .map(|i| Self(strings.value(i).to_owned()))
            .collect())
    }
}

impl From<String> for Utf8 {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Utf8 {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// An opaque byte buffer, stored as a list of `u8`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl Loggable for Blob {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::List(list_item_field(DataType::UInt8))
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        let total: usize = data.iter().map(|blob| blob.0.len()).sum();
        if i32::try_from(total).is_err() {
            return Err(SerializationError::OffsetOverflow { len: total });
        }
        let offsets = OffsetBuffer::<i32>::from_lengths(data.iter().map(|blob| blob.0.len()));
        let values = UInt8Array::from_iter_values(data.iter().flat_map(|blob| blob.0.iter().copied()));
        let list = ListArray::try_new(
            list_item_field(DataType::UInt8),
            offsets,
            Arc::new(values),
            None,
        )?;
        Ok(Arc::new(list))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let expected = Self::arrow_datatype();
        if array.data_type() != &expected {
            return Err(DeserializationError::datatype_mismatch(
                expected,
                array.data_type(),
            ));
        }
        let list = array.as_list_opt::<i32>().ok_or_else(|| {
            DeserializationError::datatype_mismatch(expected.clone(), array.data_type())
        })?;
        if list.null_count() > 0 {
            return Err(DeserializationError::MissingData(expected));
        }
        list.iter()
            .map(|bytes| match bytes {
                Some(bytes) => Ok(Self(primitive_from_arrow::<UInt8Type>(bytes.as_ref())?)),
                None => Err(DeserializationError::MissingData(DataType::UInt8)),
            })
            .collect()
    }
}

impl From<Vec<u8>> for Blob {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::Array;

    use super::*;

    #[test]
    fn blob_round_trip_keeps_boundaries() {
        let blobs = vec![Blob(vec![1, 2, 3]), Blob(vec![]), Blob(vec![4])];
        let array = Blob::to_arrow(&blobs).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.data_type(), &Blob::arrow_datatype());
        assert_eq!(Blob::from_arrow(array.as_ref()).unwrap(), blobs);
    }

    #[test]
    fn utf8_round_trip() {
        let names = vec![Utf8::from("left"), Utf8::from("right")];
        let array = Utf8::to_arrow(&names).unwrap();
        assert_eq!(Utf8::from_arrow(array.as_ref()).unwrap(), names);
    }
}
