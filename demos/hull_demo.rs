//! Hull demo: builds a hollow block, streams the face diffs, picks a face
//! and classifies the cavity.
//!
//! Usage:
//! ```text
//! cargo run --example hull_demo
//! RUST_LOG=voxhull=trace cargo run --example hull_demo
//! ```

use voxhull::math::{Point3, Vector3};
use voxhull::{Axis, HullConfig, HullManagerExt, Orientation, VoxelCoord};

fn main() -> voxhull::Result<()> {
    // Default: WARN for everything, INFO for voxhull.
    // Override with RUST_LOG env var (e.g. RUST_LOG=voxhull=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("hull_demo=info".parse().unwrap_or_default())
        .add_directive("voxhull=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut ext = HullManagerExt::<u32>::with_config(HullConfig {
        domain_radius: 64,
        ..HullConfig::default()
    })?;

    // 5x5x5 block with a 3x3x3 hole in the middle.
    for x in 0..5 {
        for y in 0..5 {
            for z in 0..5 {
                let shell = [x, y, z].iter().any(|&c| c == 0 || c == 4);
                if shell {
                    ext.hull_mut().update(VoxelCoord::new(x, y, z), 0xff_80_40)?;
                }
            }
        }
    }

    for o in Orientation::ALL {
        let added = ext.hull_mut().hull_additions(o).len();
        let removed = ext.hull_mut().hull_removals(o).len();
        tracing::info!(%o, added, removed, "initial diff");
    }

    // Repaint one voxel and open a window into the hole.
    ext.hull_mut().update(VoxelCoord::new(2, 2, 4), 0x20_20_ff)?;
    ext.hull_mut().clear_position(VoxelCoord::new(0, 2, 2))?;
    for o in Orientation::ALL {
        let added = ext.hull_mut().hull_additions(o);
        let removed = ext.hull_mut().hull_removals(o);
        if !added.is_empty() || !removed.is_empty() {
            tracing::info!(%o, added = added.len(), removed = removed.len(), "edit diff");
        }
    }

    let origin = Point3::new(-10.5, 2.5, 2.5);
    let direction = Vector3::new(1.0, 0.0, 0.0);
    match ext.hit_test(&origin, &direction) {
        Some(hit) => tracing::info!(coord = ?hit.coord, face = %hit.orientation, "picked"),
        None => tracing::info!("ray missed"),
    }

    let has_cavity = ext.compute_exterior()?;
    tracing::info!(has_cavity, "with window");

    ext.hull_mut().update(VoxelCoord::new(0, 2, 2), 0xff_80_40)?;
    let has_cavity = ext.compute_exterior()?;
    let hollow = ext.empty_interior()?;
    tracing::info!(has_cavity, hollow = hollow.len(), "window closed");

    if let Some(bounds) = ext.hull_mut().bounds() {
        tracing::info!(min = ?bounds.min, max = ?bounds.max, "bounds");
    }
    for axis in Axis::ALL {
        let segments = ext.hull().outline(axis);
        tracing::info!(?axis, segments = segments.len(), "outline");
    }

    Ok(())
}
