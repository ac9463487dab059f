use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, StructArray},
    datatypes::{DataType, Field, Fields},
};

use super::{Float32, Vec3D};
use crate::{
    error::{DeserializationError, DeserializationResult, SerializationResult},
    loggable::Loggable,
};

/// An angle, stored in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    pub radians: f32,
}

impl Angle {
    #[inline]
    pub const fn from_radians(radians: f32) -> Self {
        Self { radians }
    }

    #[inline]
    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    #[inline]
    pub fn degrees(&self) -> f32 {
        self.radians.to_degrees()
    }
}

/// 3D rotation represented by a rotation around a given axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationAxisAngle {
    /// Axis to rotate around. Need not be normalized.
    pub axis: Vec3D,

    /// How much to rotate around the axis.
    pub angle: Angle,
}

impl RotationAxisAngle {
    #[inline]
    pub fn new(axis: impl Into<Vec3D>, angle: Angle) -> Self {
        Self {
            axis: axis.into(),
            angle,
        }
    }

    fn fields() -> Fields {
        Fields::from(vec![
            Field::new("axis", Vec3D::arrow_datatype(), false),
            Field::new("angle", Float32::arrow_datatype(), false),
        ])
    }
}

impl Loggable for RotationAxisAngle {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Struct(Self::fields())
    }

    fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
        let axes: Vec<Vec3D> = data.iter().map(|datum| datum.axis).collect();
        let angles: Vec<Float32> = data
            .iter()
            .map(|datum| Float32(datum.angle.radians))
            .collect();
        let array = StructArray::try_new(
            Self::fields(),
            vec![Vec3D::to_arrow(&axes)?, Float32::to_arrow(&angles)?],
            None,
        )?;
        Ok(Arc::new(array))
    }

    fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let expected = Self::arrow_datatype();
        let structs = array.as_struct_opt().ok_or_else(|| {
            DeserializationError::datatype_mismatch(expected.clone(), array.data_type())
        })?;
        if structs.null_count() > 0 {
            return Err(DeserializationError::MissingData(expected));
        }
        let column = |name: &str| {
            structs.column_by_name(name).ok_or_else(|| {
                DeserializationError::datatype_mismatch(expected.clone(), array.data_type())
            })
        };
        let axes = Vec3D::from_arrow(column("axis")?.as_ref())?;
        let angles = Float32::from_arrow(column("angle")?.as_ref())?;
        Ok(axes
            .into_iter()
            .zip(angles)
            .map(|(axis, angle)| Self {
                axis,
                angle: Angle::from_radians(angle.0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_layout_round_trip() {
        let rotations = vec![
            RotationAxisAngle::new((0.0, 0.0, 1.0), Angle::from_radians(0.5)),
            RotationAxisAngle::new([1.0, 0.0, 0.0], Angle::from_radians(-1.0)),
        ];
        let array = RotationAxisAngle::to_arrow(&rotations).unwrap();
        assert_eq!(array.data_type(), &RotationAxisAngle::arrow_datatype());
        assert_eq!(
            RotationAxisAngle::from_arrow(array.as_ref()).unwrap(),
            rotations
        );
    }

    #[test]
    fn degrees_convert_to_radians() {
        let angle = Angle::from_degrees(180.0);
        assert!((angle.radians - std::f32::consts::PI).abs() < 1e-6);
        assert!((angle.degrees() - 180.0).abs() < 1e-4);
    }
}
