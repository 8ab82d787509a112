pub mod consts;
pub mod error;
pub mod config;

pub mod vector;
pub mod color;
pub mod ray;

pub mod geometry;
pub mod light;
pub mod scene;
pub mod intersect;
pub mod shade;

pub mod camera;
pub mod canvas;
pub mod parallel;

use crate::consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
