mod mesh3d;
mod transform3d;
mod view_coordinates;

pub use mesh3d::Mesh3D;
pub use transform3d::Transform3D;
pub use view_coordinates::ViewCoordinates;
