use serde::Serialize;

/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Extent along each axis (`max - min`).
    pub fn dimensions(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Smallest of the three extents.
    pub fn min_dimension(&self) -> f64 {
        let d = self.dimensions();
        d[0].min(d[1]).min(d[2])
    }

    /// Centre point of the box.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    /// Length of the space diagonal.
    pub fn diagonal(&self) -> f64 {
        let [dx, dy, dz] = self.dimensions();
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether a point lies inside (or on the boundary of) the box.
    pub fn contains_point(&self, p: [f64; 3]) -> bool {
        p[0] >= self.min[0]
            && p[0] <= self.max[0]
            && p[1] >= self.min[1]
            && p[1] <= self.max[1]
            && p[2] >= self.min[2]
            && p[2] <= self.max[2]
    }
}
