pub use kurbo::Point;

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Return `true` when `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= f64::from(self.width) && p.y >= 0.0 && p.y <= f64::from(self.height)
    }

    /// Clamp a point into the canvas bounds.
    pub fn clamp(self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, f64::from(self.width)),
            p.y.clamp(0.0, f64::from(self.height)),
        )
    }
}

/// Identifier assigned to a generation job by the backend at submission.
///
/// Opaque to the core; the in-memory simulation hands out an incrementing
/// counter, a production queue may hand out anything that fits in a `u64`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
