mod color;
mod image;
mod magnification_filter;
mod spatial;
mod text;
mod transform_relation;
mod view_coordinates;

pub use color::*;
pub use image::*;
pub use magnification_filter::*;
pub use spatial::*;
pub use text::*;
pub use transform_relation::*;
pub use view_coordinates::*;
