//! Math utilities and types
//!
//! Provides the 2D vector types used by the collision code. Positions use a
//! y-down screen convention: `top` is the smaller y, `bottom` the larger one.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type (RGBA colors for debug drawing)
pub type Vec4 = Vector4<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Component-wise minimum of two vectors
    pub fn min(a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(a.x.min(b.x), a.y.min(b.y))
    }

    /// Component-wise maximum of two vectors
    pub fn max(a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(a.x.max(b.x), a.y.max(b.y))
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(a: Vec2, b: Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Build a vector from a plain `[x, y]` array (config files use arrays)
    pub fn vec2(value: [f32; 2]) -> Vec2 {
        Vec2::new(value[0], value[1])
    }
}
