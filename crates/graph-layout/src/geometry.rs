/// 2D vector with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Return the component-wise maximum of two vectors
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Swap the x and y components
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Half of this vector
    pub fn half(self) -> Self {
        Self {
            x: self.x / 2.0,
            y: self.y / 2.0,
        }
    }
}

/// 2D point with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Translate the point by `delta`
    pub fn offset(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    /// Top-left corner of a box of the given size centred on this point
    pub fn top_left(self, size: Vec2) -> Self {
        let half = size.half();
        Self {
            x: self.x - half.x,
            y: self.y - half.y,
        }
    }
}
