use super::{Axis, Orientation, VoxelId};
use crate::error::{ConfigError, DomainError, Result};
use crate::math::VoxelCoord;

/// Largest supported domain radius; keeps the padded cube volume within `i64`.
pub const MAX_DOMAIN_RADIUS: i32 = 1 << 19;

/// Bijective mapping between the coordinates of a bounded cube and linear ids.
///
/// Valid voxel coordinates satisfy `-radius <= c < radius` on every axis.
/// Ids are laid out over a cube padded by one cell on each side, so every
/// neighbor of a valid voxel owns its own id and unit steps never wrap
/// around into another row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeIndexer {
    radius: i32,
    width: i64,
    area: i64,
}

impl CubeIndexer {
    /// Creates an indexer for the cube `[-radius, radius)^3`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRadius` if `radius` is outside
    /// `1..=MAX_DOMAIN_RADIUS`.
    pub fn new(radius: i32) -> Result<Self> {
        if !(1..=MAX_DOMAIN_RADIUS).contains(&radius) {
            return Err(ConfigError::InvalidRadius(radius).into());
        }
        let width = 2 * i64::from(radius) + 2;
        Ok(Self {
            radius,
            width,
            area: width * width,
        })
    }

    #[must_use]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Returns true if `coord` lies inside the voxel domain.
    #[must_use]
    pub fn contains(&self, coord: &VoxelCoord) -> bool {
        coord.iter().all(|&c| -self.radius <= c && c < self.radius)
    }

    /// Encodes a coordinate of the domain.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfDomain` if `coord` is outside the domain.
    pub fn id(&self, coord: &VoxelCoord) -> Result<VoxelId> {
        if !self.contains(coord) {
            return Err(DomainError::OutOfDomain {
                x: coord.x,
                y: coord.y,
                z: coord.z,
                radius: self.radius,
            }
            .into());
        }
        Ok(self.linear_id(coord))
    }

    /// Encodes any coordinate with the linear layout, without a domain check.
    ///
    /// Arithmetic wraps, so stepping from the result stays consistent with
    /// [`CubeIndexer::step`] for any coordinate; the id only addresses a real
    /// cell when the coordinate is inside the padded cube.
    pub(crate) fn linear_id(&self, coord: &VoxelCoord) -> VoxelId {
        let offset = i64::from(self.radius) + 1;
        let x = i64::from(coord.x) + offset;
        let y = (i64::from(coord.y) + offset).wrapping_mul(self.width);
        let z = (i64::from(coord.z) + offset).wrapping_mul(self.area);
        VoxelId(x.wrapping_add(y).wrapping_add(z))
    }

    /// Decodes an id back to its coordinate.
    ///
    /// Ids of the padding ring decode to coordinates one cell outside the
    /// domain.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if the id lies outside the padded cube.
    pub fn coord(&self, id: VoxelId) -> Result<VoxelCoord> {
        if id.0 < 0 || id.0 >= self.area * self.width {
            return Err(DomainError::InvalidId(id.0).into());
        }
        Ok(self.decode(id))
    }

    /// Decodes an id known to lie inside the padded cube.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn decode(&self, id: VoxelId) -> VoxelCoord {
        let offset = i64::from(self.radius) + 1;
        let x = id.0.rem_euclid(self.width) - offset;
        let y = id.0.div_euclid(self.width).rem_euclid(self.width) - offset;
        let z = id.0.div_euclid(self.area) - offset;
        VoxelCoord::new(x as i32, y as i32, z as i32)
    }

    /// Moves one cell in the given orientation.
    #[must_use]
    pub fn step(&self, id: VoxelId, orientation: Orientation) -> VoxelId {
        let positive = orientation.is_positive();
        match orientation.axis() {
            Axis::X => self.step_x(id, positive),
            Axis::Y => self.step_y(id, positive),
            Axis::Z => self.step_z(id, positive),
        }
    }

    #[must_use]
    pub fn step_x(&self, id: VoxelId, positive: bool) -> VoxelId {
        VoxelId(if positive {
            id.0.wrapping_add(1)
        } else {
            id.0.wrapping_sub(1)
        })
    }

    #[must_use]
    pub fn step_y(&self, id: VoxelId, positive: bool) -> VoxelId {
        VoxelId(if positive {
            id.0.wrapping_add(self.width)
        } else {
            id.0.wrapping_sub(self.width)
        })
    }

    #[must_use]
    pub fn step_z(&self, id: VoxelId, positive: bool) -> VoxelId {
        VoxelId(if positive {
            id.0.wrapping_add(self.area)
        } else {
            id.0.wrapping_sub(self.area)
        })
    }
}
