use std::collections::HashMap;

use crate::config::HullConfig;
use crate::index::Axis;
use crate::math::Point3;

/// A closed loop of grid-corner vertices.
pub type GridLoop = Vec<[i32; 2]>;

/// Traces the boundaries of the filled cells of a 2D occupancy grid.
///
/// `grid[u][v]` is the cell spanning corners `(u, v)` and `(u + 1, v + 1)`.
/// Every returned loop keeps the filled cells on its left, so outer
/// boundaries run counter-clockwise and holes clockwise. Where two filled
/// cells touch only at a corner the walk turns left, keeping them in
/// separate loops. Collinear vertices are dropped.
#[must_use]
pub fn grid_to_polygons(grid: &[Vec<bool>]) -> Vec<GridLoop> {
    let edges = boundary_edges(grid);
    if edges.is_empty() {
        return Vec::new();
    }

    let mut outgoing: HashMap<[i32; 2], Vec<usize>> = HashMap::new();
    for (idx, &(start, _)) in edges.iter().enumerate() {
        outgoing.entry(start).or_default().push(idx);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        let origin = edges[first].0;
        let mut vertices = Vec::new();
        let mut current = first;
        loop {
            used[current] = true;
            let (start, end) = edges[current];
            vertices.push(start);
            if end == origin {
                break;
            }
            let Some(next) = pick_next_edge(&edges, &outgoing, &used, start, end) else {
                break;
            };
            current = next;
        }
        let simplified = drop_collinear(&vertices);
        if simplified.len() >= 3 {
            loops.push(simplified);
        }
    }

    loops
}

/// Collects the unit boundary edges, oriented with the filled cell on the left.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn boundary_edges(grid: &[Vec<bool>]) -> Vec<([i32; 2], [i32; 2])> {
    let filled = |u: i32, v: i32| -> bool {
        if u < 0 || v < 0 {
            return false;
        }
        grid.get(u as usize)
            .and_then(|column| column.get(v as usize))
            .copied()
            .unwrap_or(false)
    };

    let mut edges = Vec::new();
    for (u, column) in grid.iter().enumerate() {
        for (v, &cell) in column.iter().enumerate() {
            if !cell {
                continue;
            }
            let (u, v) = (u as i32, v as i32);
            if !filled(u, v - 1) {
                edges.push(([u, v], [u + 1, v]));
            }
            if !filled(u + 1, v) {
                edges.push(([u + 1, v], [u + 1, v + 1]));
            }
            if !filled(u, v + 1) {
                edges.push(([u + 1, v + 1], [u, v + 1]));
            }
            if !filled(u - 1, v) {
                edges.push(([u, v + 1], [u, v]));
            }
        }
    }
    edges
}

/// Chooses the continuation at `node`: left turn, then straight, then right.
fn pick_next_edge(
    edges: &[([i32; 2], [i32; 2])],
    outgoing: &HashMap<[i32; 2], Vec<usize>>,
    used: &[bool],
    from: [i32; 2],
    node: [i32; 2],
) -> Option<usize> {
    let dir = [node[0] - from[0], node[1] - from[1]];
    let preferences = [
        [-dir[1], dir[0]],
        [dir[0], dir[1]],
        [dir[1], -dir[0]],
    ];
    let candidates = outgoing.get(&node)?;
    preferences.iter().find_map(|want| {
        candidates.iter().copied().find(|&idx| {
            let (start, end) = edges[idx];
            !used[idx] && [end[0] - start[0], end[1] - start[1]] == *want
        })
    })
}

fn drop_collinear(vertices: &[[i32; 2]]) -> GridLoop {
    let n = vertices.len();
    (0..n)
        .filter(|&i| {
            let p = vertices[(i + n - 1) % n];
            let c = vertices[i];
            let q = vertices[(i + 1) % n];
            (c[0] - p[0]) * (q[1] - c[1]) - (c[1] - p[1]) * (q[0] - c[0]) != 0
        })
        .map(|i| vertices[i])
        .collect()
}

/// Projects footprint cells onto the plane perpendicular to `axis` and
/// returns the traced boundary as world-space line segments.
///
/// `cells` are `(u, v)` pairs on the axes of `axis.others()`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn project_outline(
    cells: &[(i32, i32)],
    axis: Axis,
    config: &HullConfig,
) -> Vec<[Point3; 2]> {
    let Some(&(first_u, first_v)) = cells.first() else {
        return Vec::new();
    };
    let (mut min_u, mut max_u, mut min_v, mut max_v) = (first_u, first_u, first_v, first_v);
    for &(u, v) in cells {
        min_u = min_u.min(u);
        max_u = max_u.max(u);
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }

    let mut grid = vec![vec![false; (max_v - min_v + 1) as usize]; (max_u - min_u + 1) as usize];
    for &(u, v) in cells {
        grid[(u - min_u) as usize][(v - min_v) as usize] = true;
    }

    let [u_axis, v_axis] = axis.others();
    let to_world = |corner: [i32; 2]| -> Point3 {
        let mut grid_pos = [0.0; 3];
        grid_pos[u_axis.index()] = f64::from(min_u + corner[0]);
        grid_pos[v_axis.index()] = f64::from(min_v + corner[1]);
        Point3::new(
            grid_pos[0] * config.voxel_size - config.world_offset.x,
            grid_pos[1] * config.voxel_size - config.world_offset.y,
            grid_pos[2] * config.voxel_size - config.world_offset.z,
        )
    };

    let mut segments = Vec::new();
    for polygon in grid_to_polygons(&grid) {
        let n = polygon.len();
        for i in 0..n {
            segments.push([to_world(polygon[i]), to_world(polygon[(i + 1) % n])]);
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(polygon: &[[i32; 2]]) -> i32 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let a = polygon[i];
                let b = polygon[(i + 1) % n];
                a[0] * b[1] - b[0] * a[1]
            })
            .sum::<i32>()
    }

    #[test]
    fn empty_grid_has_no_loops() {
        assert!(grid_to_polygons(&[]).is_empty());
        assert!(grid_to_polygons(&[vec![false, false]]).is_empty());
    }

    #[test]
    fn single_cell_is_ccw_square() {
        let loops = grid_to_polygons(&[vec![true]]);
        assert_eq!(loops, vec![vec![[0, 0], [1, 0], [1, 1], [0, 1]]]);
    }

    #[test]
    fn straight_runs_are_merged() {
        let loops = grid_to_polygons(&[vec![true, true], vec![true, true], vec![true, true]]);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_eq!(signed_area(&loops[0]), 2 * 6);
    }

    #[test]
    fn ring_has_outer_and_hole() {
        let grid = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let loops = grid_to_polygons(&grid);
        assert_eq!(loops.len(), 2);
        let mut areas: Vec<i32> = loops.iter().map(|l| signed_area(l)).collect();
        areas.sort_unstable();
        assert_eq!(areas, vec![-2, 2 * 9]);
    }

    #[test]
    fn diagonal_cells_stay_separate() {
        let grid = vec![vec![true, false], vec![false, true]];
        let loops = grid_to_polygons(&grid);
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|l| l.len() == 4));
    }

    #[test]
    fn projected_square_is_offset_and_scaled() {
        let config = HullConfig::default();
        let segments = project_outline(&[(2, 3)], Axis::Z, &config);
        assert_eq!(segments.len(), 4);
        let first = segments[0][0];
        approx::assert_relative_eq!(first.x, 2.0 * 10.0 - 5.0);
        approx::assert_relative_eq!(first.y, 3.0 * 10.0 - 5.0);
        approx::assert_relative_eq!(first.z, -5.0);
    }
}
