mod image_format;
mod rotation_axis_angle;
mod scalars;
mod utf8;
mod vec;

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, FixedSizeListArray, PrimitiveArray},
    datatypes::{ArrowPrimitiveType, DataType, Field},
};
pub use image_format::*;
pub use rotation_axis_angle::*;
pub use scalars::*;
pub use utf8::*;
pub use vec::*;

use crate::error::{DeserializationError, DeserializationResult, SerializationResult};

pub(crate) fn primitive_to_arrow<T>(values: impl IntoIterator<Item = T::Native>) -> ArrayRef
where
    T: ArrowPrimitiveType,
{
    Arc::new(PrimitiveArray::<T>::from_iter_values(values))
}

pub(crate) fn primitive_from_arrow<T>(array: &dyn Array) -> DeserializationResult<Vec<T::Native>>
where
    T: ArrowPrimitiveType,
{
    let primitive = array
        .as_primitive_opt::<T>()
        .ok_or_else(|| DeserializationError::datatype_mismatch(T::DATA_TYPE, array.data_type()))?;
    if primitive.null_count() > 0 {
        return Err(DeserializationError::MissingData(T::DATA_TYPE));
    }
    Ok(primitive.values().to_vec())
}

/// Child field of every fixed-size list datatype in this crate.
pub(crate) fn list_item_field(data_type: DataType) -> Arc<Field> {
    Arc::new(Field::new("item", data_type, false))
}

pub(crate) fn fixed_size_list_datatype<T>(size: usize) -> DataType
where
    T: ArrowPrimitiveType,
{
    DataType::FixedSizeList(list_item_field(T::DATA_TYPE), size as i32)
}

pub(crate) fn fixed_size_to_arrow<T, const N: usize>(
    rows: impl IntoIterator<Item = [T::Native; N]>,
) -> SerializationResult<ArrayRef>
where
    T: ArrowPrimitiveType,
{
    let values = PrimitiveArray::<T>::from_iter_values(rows.into_iter().flatten());
    let list = FixedSizeListArray::try_new(
        list_item_field(T::DATA_TYPE),
        N as i32,
        Arc::new(values),
        None,
    )?;
    Ok(Arc::new(list))
}

pub(crate) fn fixed_size_from_arrow<T, const N: usize>(
    array: &dyn Array,
) -> DeserializationResult<Vec<[T::Native; N]>>
where
    T: ArrowPrimitiveType,
{
    let expected = fixed_size_list_datatype::<T>(N);
    if array.data_type() != &expected {
        return Err(DeserializationError::datatype_mismatch(
            expected,
            array.data_type(),
        ));
    }
    let list = array
        .as_fixed_size_list_opt()
        .ok_or_else(|| DeserializationError::datatype_mismatch(expected.clone(), array.data_type()))?;
    if list.null_count() > 0 {
        return Err(DeserializationError::MissingData(expected));
    }
    let values = list
        .values()
        .as_primitive_opt::<T>()
        .ok_or_else(|| DeserializationError::datatype_mismatch(T::DATA_TYPE, &list.value_type()))?;
    if values.null_count() > 0 {
        return Err(DeserializationError::MissingData(T::DATA_TYPE));
    }
    let values = values.values();

    Ok((0..list.len())
        .map(|row| {
            let offset = list.value_offset(row) as usize;
            let mut out = [T::Native::default(); N];
            out.copy_from_slice(&values[offset..offset + N]);
            out
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Array, Float32Array},
        datatypes::{DataType, Float32Type, UInt32Type},
    };

    use super::*;
    use crate::error::DeserializationError;

    #[test]
    fn fixed_size_list_reads_sliced_rows() {
        let array = fixed_size_to_arrow::<Float32Type, 3>([
            [0.0, 1.0, 2.0],
            [3.0, 4.0, 5.0],
            [6.0, 7.0, 8.0],
        ])
        .unwrap();
        let tail = array.slice(1, 2);
        let rows = fixed_size_from_arrow::<Float32Type, 3>(tail.as_ref()).unwrap();
        assert_eq!(rows, vec![[3.0, 4.0, 5.0], [6.0, 7.0, 8.0]]);
    }

    #[test]
    fn fixed_size_list_rejects_wrong_width() {
        let array = fixed_size_to_arrow::<Float32Type, 2>([[0.0, 1.0]]).unwrap();
        let err = fixed_size_from_arrow::<Float32Type, 3>(array.as_ref()).unwrap_err();
        assert!(matches!(err, DeserializationError::DatatypeMismatch { .. }));
    }

    #[test]
    fn primitive_rejects_nulls_and_wrong_types() {
        let with_null = Float32Array::from(vec![Some(1.0), None]);
        assert!(matches!(
            primitive_from_arrow::<Float32Type>(&with_null),
            Err(DeserializationError::MissingData(DataType::Float32))
        ));
        assert!(matches!(
            primitive_from_arrow::<UInt32Type>(&with_null),
            Err(DeserializationError::DatatypeMismatch { .. })
        ));
        assert_eq!(with_null.len(), 2);
    }
}
