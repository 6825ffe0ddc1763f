pub mod collide;
pub mod polygon;
pub mod response;

pub use collide::{aabb_overlap, intersect, intersect_from};
pub use polygon::{Interval, Polygon};
pub use response::{Resolution, resolve};
