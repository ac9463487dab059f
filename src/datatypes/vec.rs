use arrow::{
    array::{Array, ArrayRef},
    datatypes::{DataType, Float32Type, UInt32Type},
};

use super::{fixed_size_from_arrow, fixed_size_list_datatype, fixed_size_to_arrow};
use crate::{
    error::{DeserializationResult, SerializationResult},
    loggable::Loggable,
};

macro_rules! fixed_size_datatype {
    (
        $(#[$meta:meta])*
        $name:ident([$native:ty; $n:literal]) as $arrow:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name(pub [$native; $n]);

        impl Loggable for $name {
            #[inline]
            fn arrow_datatype() -> DataType {
                fixed_size_list_datatype::<$arrow>($n)
            }

            fn to_arrow(data: &[Self]) -> SerializationResult<ArrayRef> {
                fixed_size_to_arrow::<$arrow, $n>(data.iter().map(|datum| datum.0))
            }

            fn from_arrow(array: &dyn Array) -> DeserializationResult<Vec<Self>> {
                Ok(fixed_size_from_arrow::<$arrow, $n>(array)?
                    .into_iter()
                    .map(Self)
                    .collect())
            }
        }

        impl From<[$native; $n]> for $name {
            #[inline]
            fn from(values: [$native; $n]) -> Self {
                Self(values)
            }
        }
    };
}

fixed_size_datatype!(
    /// A vector in 2D space.
    Vec2D([f32; 2]) as Float32Type
);

fixed_size_datatype!(
    /// A vector in 3D space.
    Vec3D([f32; 3]) as Float32Type
);

fixed_size_datatype!(
    /// A vector of three unsigned integers, e.g. the vertex indices of a triangle.
    UVec3D([u32; 3]) as UInt32Type
);

fixed_size_datatype!(
    /// A 3x3 matrix, stored column-major.
    Mat3x3([f32; 9]) as Float32Type
);

fixed_size_datatype!(
    /// A quaternion stored as `[x, y, z, w]`.
    Quaternion([f32; 4]) as Float32Type
);

impl Vec2D {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self([x, y])
    }
}

impl From<(f32, f32)> for Vec2D {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Vec3D {
    pub const ZERO: Self = Self([0.0; 3]);
    pub const ONE: Self = Self([1.0; 3]);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<(f32, f32, f32)> for Vec3D {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl UVec3D {
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self([x, y, z])
    }
}

impl From<(u32, u32, u32)> for UVec3D {
    #[inline]
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Mat3x3 {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Builds a matrix from rows, transposing into column-major storage.
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self([
            rows[0][0], rows[1][0], rows[2][0], //
            rows[0][1], rows[1][1], rows[2][1], //
            rows[0][2], rows[1][2], rows[2][2],
        ])
    }

    /// Column `index` (0..3).
    #[inline]
    pub fn col(&self, index: usize) -> [f32; 3] {
        let start = index * 3;
        [self.0[start], self.0[start + 1], self.0[start + 2]]
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self([0.0, 0.0, 0.0, 1.0]);

    #[inline]
    pub const fn from_xyzw(xyzw: [f32; 4]) -> Self {
        Self(xyzw)
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::Array;

    use super::*;

    #[test]
    fn vec3d_arrays_are_fixed_size_lists() {
        let array = Vec3D::to_arrow(&[Vec3D::new(1.0, 2.0, 3.0), Vec3D::ONE]).unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.data_type(), &Vec3D::arrow_datatype());
        assert_eq!(
            Vec3D::from_arrow(array.as_ref()).unwrap(),
            vec![Vec3D::new(1.0, 2.0, 3.0), Vec3D::ONE]
        );
    }

    #[test]
    fn matrix_rows_become_columns() {
        let mat = Mat3x3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(mat.col(0), [1.0, 4.0, 7.0]);
        assert_eq!(mat.col(2), [3.0, 6.0, 9.0]);
        assert_eq!(Mat3x3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]), Mat3x3::IDENTITY);
    }

    #[test]
    fn empty_input_gives_empty_array_of_the_same_type() {
        let array = UVec3D::to_arrow(&[]).unwrap();
        assert_eq!(array.len(), 0);
        assert_eq!(array.data_type(), UVec3D::arrow_empty().data_type());
    }
}
