use crate::canvas::model::Point;
use crate::canvas::raster::Raster;

/// Extent of the opaque pixels on a raster.
///
/// A scan of a blank raster leaves the initial values in place
/// (`min_x = width`, `max_x = 0`), so the box is inverted. Callers check
/// [`BoundingBox::is_empty`] before using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(Point::new(
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        ))
    }
}

pub fn scan(raster: &Raster) -> BoundingBox {
    let (width, height) = raster.size();
    let mut bbox = BoundingBox {
        min_x: width,
        min_y: height,
        max_x: 0,
        max_y: 0,
    };
    if width == 0 {
        return bbox;
    }
    for (row_idx, row) in raster.pixels().chunks_exact(width as usize * 4).enumerate() {
        let y = row_idx as u32;
        for (col_idx, px) in row.chunks_exact(4).enumerate() {
            if px[3] > 0 {
                let x = col_idx as u32;
                bbox.min_x = bbox.min_x.min(x);
                bbox.min_y = bbox.min_y.min(y);
                bbox.max_x = bbox.max_x.max(x);
                bbox.max_y = bbox.max_y.max(y);
            }
        }
    }
    bbox
}
