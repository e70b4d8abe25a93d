use crate::error::{ConfigError, Result};
use crate::index::MAX_DOMAIN_RADIUS;
use crate::math::Vector3;

/// Parameters controlling the hull engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Half edge length of the cubic coordinate domain.
    ///
    /// Valid voxel coordinates satisfy `-domain_radius <= c < domain_radius`.
    pub domain_radius: i32,
    /// Number of cell steps a pick ray may take before reporting no hit.
    pub raycast_max_steps: usize,
    /// Edge length of one voxel in world units, used by outlines.
    pub voxel_size: f64,
    /// Offset subtracted from scaled grid positions to reach world space.
    pub world_offset: Vector3,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            domain_radius: 800,
            raycast_max_steps: 400,
            voxel_size: 10.0,
            world_offset: Vector3::new(5.0, 5.0, 5.0),
        }
    }
}

impl HullConfig {
    /// Checks that all parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRadius` if the radius is outside
    /// `1..=MAX_DOMAIN_RADIUS`, or `ConfigError::InvalidParameter` for a zero
    /// step budget or a non-positive voxel size.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_DOMAIN_RADIUS).contains(&self.domain_radius) {
            return Err(ConfigError::InvalidRadius(self.domain_radius).into());
        }
        if self.raycast_max_steps == 0 {
            return Err(
                ConfigError::InvalidParameter("raycast_max_steps must be positive".to_owned())
                    .into(),
            );
        }
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(ConfigError::InvalidParameter(format!(
                "voxel_size must be positive and finite, got {}",
                self.voxel_size
            ))
            .into());
        }
        if !self.world_offset.iter().all(|c| c.is_finite()) {
            return Err(
                ConfigError::InvalidParameter("world_offset must be finite".to_owned()).into(),
            );
        }
        Ok(())
    }
}
