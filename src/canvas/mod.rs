pub mod bounds;
pub mod model;
pub mod raster;
pub mod surface;

pub use bounds::{scan, BoundingBox};
pub use model::{Color, Point, StrokeState, Tool};
pub use raster::Raster;
pub use surface::CanvasSurface;
