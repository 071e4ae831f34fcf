//! Geometry primitives for boundary files

pub mod area;

pub use area::{combine_rings, CombinedArea, SurfaceContext};

use crate::types::Point;

/// An ordered sequence of 2-D points bounding a polygon or one of its holes
///
/// Rings are implicitly closed: the first and last point coincide. Rings
/// arriving open are closed before any area or centroid computation.
#[derive(Debug, Clone)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    /// Creates a ring from its points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the number of stored points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns whether this ring has enough points to bound an area
    pub fn is_usable(&self) -> bool {
        self.points.len() >= 3
    }

    /// Returns the ring's points with the closing point appended when the
    /// ring arrives open
    pub fn closed_points(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        points
    }
}

/// The coordinate space a boundary file's points are interpreted in
///
/// This is a heuristic, not a declared property of the file: a file whose
/// points all fall within [-180, 180] x [-90, 90] is treated as geographic
/// degrees, anything else as a projected linear unit. The decision is made
/// once per file by [`classify`] and applied uniformly to all of its rings;
/// an explicit caller-supplied declaration could override it later without
/// restructuring the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// Longitude/latitude degrees
    Geographic,
    /// A projected linear unit requiring a unit declaration or default
    Projected,
}

/// Classifies the coordinate space of a file's rings
pub fn classify(rings: &[Ring]) -> CoordinateSystem {
    let all_in_degree_range = rings
        .iter()
        .flat_map(|ring| ring.points.iter())
        .all(|point| point.in_degree_range());

    if all_in_degree_range {
        CoordinateSystem::Geographic
    } else {
        CoordinateSystem::Projected
    }
}
