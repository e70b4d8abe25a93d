pub mod diff;
mod face_set;
mod manager;
pub mod outline;

pub use diff::ChangeQueue;
pub use face_set::FaceSet;
pub use manager::{HullManager, VoxelBounds};
