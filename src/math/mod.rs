/// 3D point type in world space.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type in world space.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Integer voxel coordinate.
pub type VoxelCoord = nalgebra::Point3<i32>;

/// Global tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;
