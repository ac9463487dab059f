use crate::{datatypes, loggable::delegate_component};

delegate_component!(
    /// **Component**: A position in 3D space.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    Position3D(datatypes::Vec3D) => "rerun.components.Position3D"
);

delegate_component!(
    /// **Component**: A vector in 3D space, e.g. a vertex normal.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    Vector3D(datatypes::Vec3D) => "rerun.components.Vector3D"
);

delegate_component!(
    /// **Component**: A translation vector in 3D space.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    Translation3D(datatypes::Vec3D) => "rerun.components.Translation3D"
);

delegate_component!(
    /// **Component**: A 3D scale factor.
    ///
    /// A scale of 1.0 means no scaling, 2.0 doubles the size. Each element scales
    /// along the corresponding axis.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    Scale3D(datatypes::Vec3D) => "rerun.components.Scale3D"
);

delegate_component!(
    /// **Component**: A 2D texture UV coordinate.
    ///
    /// `[0, 0]` is the top-left corner of the texture, `[1, 1]` the bottom-right.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    Texcoord2D(datatypes::Vec2D) => "rerun.components.Texcoord2D"
);

delegate_component!(
    /// **Component**: The three vertex indices of a triangle.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    TriangleIndices(datatypes::UVec3D) => "rerun.components.TriangleIndices"
);

delegate_component!(
    /// **Component**: 3D rotation represented by a rotation around a given axis.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    RotationAxisAngle(datatypes::RotationAxisAngle) => "rerun.components.RotationAxisAngle"
);

delegate_component!(
    /// **Component**: A 3D rotation expressed as a quaternion `[x, y, z, w]`.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    RotationQuat(datatypes::Quaternion) => "rerun.components.RotationQuat"
);

delegate_component!(
    /// **Component**: A 3x3 transformation matrix, column-major.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    TransformMat3x3(datatypes::Mat3x3) => "rerun.components.TransformMat3x3"
);

delegate_component!(
    /// **Component**: A 3x3 transformation matrix applied per instance pose.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    PoseTransformMat3x3(datatypes::Mat3x3) => "rerun.components.PoseTransformMat3x3"
);

delegate_component!(
    /// **Component**: The length of an axis in local units of the space.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    AxisLength(datatypes::Float32) => "rerun.components.AxisLength"
);

macro_rules! impl_vec3_conversions {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                #[inline]
                pub const fn new(x: f32, y: f32, z: f32) -> Self {
                    Self(datatypes::Vec3D::new(x, y, z))
                }
            }

            impl From<[f32; 3]> for $name {
                #[inline]
                fn from(xyz: [f32; 3]) -> Self {
                    Self(datatypes::Vec3D(xyz))
                }
            }

            impl From<(f32, f32, f32)> for $name {
                #[inline]
                fn from((x, y, z): (f32, f32, f32)) -> Self {
                    Self::new(x, y, z)
                }
            }
        )+
    };
}

impl_vec3_conversions!(Position3D, Vector3D, Translation3D, Scale3D);

impl Scale3D {
    #[inline]
    pub const fn uniform(scale: f32) -> Self {
        Self::new(scale, scale, scale)
    }
}

impl From<f32> for Scale3D {
    #[inline]
    fn from(scale: f32) -> Self {
        Self::uniform(scale)
    }
}

impl From<[f32; 2]> for Texcoord2D {
    #[inline]
    fn from(uv: [f32; 2]) -> Self {
        Self(datatypes::Vec2D(uv))
    }
}

impl From<[u32; 3]> for TriangleIndices {
    #[inline]
    fn from(indices: [u32; 3]) -> Self {
        Self(datatypes::UVec3D(indices))
    }
}

impl From<[f32; 4]> for RotationQuat {
    #[inline]
    fn from(xyzw: [f32; 4]) -> Self {
        Self(datatypes::Quaternion(xyzw))
    }
}

impl RotationQuat {
    pub const IDENTITY: Self = Self(datatypes::Quaternion::IDENTITY);
}

impl TransformMat3x3 {
    pub const IDENTITY: Self = Self(datatypes::Mat3x3::IDENTITY);
}

impl PoseTransformMat3x3 {
    pub const IDENTITY: Self = Self(datatypes::Mat3x3::IDENTITY);
}

impl From<f32> for AxisLength {
    #[inline]
    fn from(length: f32) -> Self {
        Self(datatypes::Float32(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggable::{Component, Loggable};

    #[test]
    fn components_share_their_datatype_layout() {
        assert_eq!(
            Position3D::arrow_datatype(),
            datatypes::Vec3D::arrow_datatype()
        );
        assert_eq!(
            Position3D::component_type().as_str(),
            "rerun.components.Position3D"
        );
        assert_ne!(Position3D::component_type(), Vector3D::component_type());
    }

    #[test]
    fn positions_round_trip() {
        let positions = vec![Position3D::new(0.0, 1.0, 0.0), Position3D::from([1.0, 0.0, 0.0])];
        let array = Position3D::to_arrow(&positions).unwrap();
        assert_eq!(Position3D::from_arrow(array.as_ref()).unwrap(), positions);
    }

    #[test]
    fn uniform_scale_repeats_factor() {
        assert_eq!(Scale3D::from(2.0), Scale3D::new(2.0, 2.0, 2.0));
    }
}
