pub mod config;
pub mod error;
pub mod ext;
pub mod hull;
pub mod index;
pub mod math;
pub mod tracker;

pub use config::HullConfig;
pub use error::{HullError, Result};
pub use ext::{ExteriorPartition, HullManagerExt, RayHit};
pub use hull::{FaceSet, HullManager, VoxelBounds};
pub use index::{Axis, CubeIndexer, Orientation, VoxelId};
pub use math::VoxelCoord;
