//! Core types and math primitives.

pub mod math;
pub mod types;

pub use types::{Base, CongruentQuad, OrientedPoint, Point3D, PointCloud3D, PointPair};
