pub mod collision;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod math;
pub mod scene;

pub use config::WorldConfig;
pub use error::{PhysicsError, Result};
