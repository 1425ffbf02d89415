//! Geometry formulas backing the geometry handlers.
//!
//! All functions are pure. Inputs are taken as given: negative or zero
//! dimensions are computed without complaint.

use std::f64::consts::PI;

/// Area of a circle: π·r².
pub fn circle_area(radius: f64) -> f64 {
    PI * radius.powi(2)
}

/// Perimeter of a rectangle: 2·(l + w).
pub fn rectangle_perimeter(length: f64, width: f64) -> f64 {
    2.0 * (length + width)
}

/// Volume of a cube: s³.
pub fn cube_volume(side: f64) -> f64 {
    side.powi(3)
}

/// Area of a triangle: ½·b·h.
pub fn triangle_area(base: f64, height: f64) -> f64 {
    0.5 * base * height
}
