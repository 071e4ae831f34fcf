//! Area and centroid math for combined rings
//!
//! The shared core behind every boundary sub-parser: rings are classified
//! once as geographic or projected, then accumulated into a single area
//! and centroid. Signed areas are summed across rings, so inner rings
//! wound opposite to their shell subtract instead of inflating the total.

use super::{classify, CoordinateSystem, Ring};
use crate::error::{Error, Result};
use crate::types::{round_to, LatLon, Point, FOOT_TO_METERS, US_SURVEY_FOOT_TO_METERS};

/// WGS84 equatorial radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6378137.0;

/// Side context gathered alongside the rings of a boundary file
#[derive(Debug, Default)]
pub struct SurfaceContext {
    /// Companion coordinate-system description text (unit hints)
    pub unit_hint: Option<String>,
    /// Companion-supplied centroid for projected geometry
    pub companion_centroid: Option<LatLon>,
}

/// Combined area and centroid across all rings of one file
#[derive(Debug, Clone, Copy)]
pub struct CombinedArea {
    pub area_sq_meters: f64,
    pub centroid: LatLon,
    pub ring_count: usize,
    pub point_count: usize,
}

/// Signed geodesic area of a ring of lon/lat degree points, in m²
///
/// Spherical-excess line integral: for each consecutive point pair the
/// longitude delta in radians is weighted by (2 + sin lat1 + sin lat2),
/// summed over the closed ring and scaled by R²/2. Counter-clockwise
/// rings yield a positive area.
pub fn geodesic_signed_area(ring: &Ring) -> f64 {
    let points = ring.closed_points();
    let mut sum = 0.0;

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        sum += (p2.x - p1.x).to_radians()
            * (2.0 + p1.y.to_radians().sin() + p2.y.to_radians().sin());
    }

    -sum * EARTH_RADIUS_METERS * EARTH_RADIUS_METERS / 2.0
}

/// Signed planar shoelace area of a ring in its native units²
///
/// Counter-clockwise rings yield a positive area.
pub fn planar_signed_area(ring: &Ring) -> f64 {
    let points = ring.closed_points();
    let mut sum = 0.0;

    for pair in points.windows(2) {
        sum += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
    }

    sum / 2.0
}

/// Planar shoelace centroid of a ring in its native coordinates
///
/// Applied to raw degree values this is an approximation nested inside the
/// geodesic area computation; it holds for field-sized rings (kilometers,
/// not hundreds of kilometers). Returns `None` for degenerate rings.
pub fn ring_centroid(ring: &Ring) -> Option<Point> {
    let points = ring.closed_points();
    let mut doubled_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for pair in points.windows(2) {
        let cross = pair[0].x * pair[1].y - pair[1].x * pair[0].y;
        doubled_area += cross;
        cx += (pair[0].x + pair[1].x) * cross;
        cy += (pair[0].y + pair[1].y) * cross;
    }

    if doubled_area.abs() < f64::EPSILON {
        return None;
    }

    Some(Point::new(cx / (3.0 * doubled_area), cy / (3.0 * doubled_area)))
}

/// Resolves a companion description text to a meters-per-unit factor
///
/// "foot" with "us" means US survey feet, "foot" alone international feet,
/// an absent/empty/meter description means meters. Any other description
/// is a hard failure demanding explicit units.
fn resolve_unit_factor(hint: Option<&str>) -> Result<f64> {
    let text = match hint {
        None => return Ok(1.0),
        Some(text) => text.trim(),
    };

    if text.is_empty() {
        return Ok(1.0);
    }

    let lower = text.to_lowercase();
    if lower.contains("foot") {
        if lower.contains("us") {
            Ok(US_SURVEY_FOOT_TO_METERS)
        } else {
            Ok(FOOT_TO_METERS)
        }
    } else if lower.contains("meter") || lower.contains("metre") {
        Ok(1.0)
    } else {
        Err(Error::Parse(format!(
            "Cannot determine a linear unit from the coordinate system description ({}); \
             supply geometry in meters, feet, or WGS84 degrees",
            text.chars().take(80).collect::<String>()
        )))
    }
}

/// Combines all rings of one boundary file into an area and centroid
///
/// Rings with fewer than 3 points are dropped; the coordinate space is
/// classified once and gates the whole computation. A zero total area is a
/// validation failure, never a valid answer.
pub fn combine_rings(rings: Vec<Ring>, context: &SurfaceContext) -> Result<CombinedArea> {
    let usable: Vec<Ring> = rings.into_iter().filter(Ring::is_usable).collect();

    if usable.is_empty() {
        return Err(Error::Parse(
            "No rings with at least 3 points were found in the boundary file".to_string(),
        ));
    }

    let ring_count = usable.len();
    let point_count = usable.iter().map(Ring::point_count).sum();

    match classify(&usable) {
        CoordinateSystem::Geographic => {
            let mut signed_total = 0.0;
            let mut abs_total = 0.0;
            let mut weighted_x = 0.0;
            let mut weighted_y = 0.0;

            for ring in &usable {
                let signed = geodesic_signed_area(ring);
                let weight = signed.abs();
                signed_total += signed;
                abs_total += weight;

                if let Some(centroid) = ring_centroid(ring) {
                    weighted_x += centroid.x * weight;
                    weighted_y += centroid.y * weight;
                }
            }

            // Collinear degree points leave a sub-centimeter floating-point
            // residue in the spherical integral; degeneracy is judged at
            // reporting precision.
            let area_sq_meters = signed_total.abs();
            if round_to(area_sq_meters, 2) <= 0.0 || round_to(abs_total, 2) <= 0.0 {
                return Err(Error::Parse(
                    "Boundary rings enclose zero area; the field outline is degenerate"
                        .to_string(),
                ));
            }

            Ok(CombinedArea {
                area_sq_meters,
                centroid: LatLon::new(weighted_y / abs_total, weighted_x / abs_total),
                ring_count,
                point_count,
            })
        }
        CoordinateSystem::Projected => {
            let factor = resolve_unit_factor(context.unit_hint.as_deref())?;

            let mut signed_total = 0.0;
            for ring in &usable {
                signed_total += planar_signed_area(ring) * factor * factor;
            }

            let area_sq_meters = signed_total.abs();
            if round_to(area_sq_meters, 2) <= 0.0 {
                return Err(Error::Parse(
                    "Boundary rings enclose zero area; the field outline is degenerate"
                        .to_string(),
                ));
            }

            let centroid = context.companion_centroid.ok_or_else(|| {
                Error::Parse(
                    "Boundary coordinates are projected and no longitude/latitude source \
                     was found; supply WGS84 geometry or longitude/latitude attribute columns"
                        .to_string(),
                )
            })?;

            Ok(CombinedArea {
                area_sq_meters,
                centroid,
                ring_count,
                point_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(coords: &[(f64, f64)]) -> Ring {
        Ring::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// ~1 km in degrees of longitude at the equator
    const KM_DEG: f64 = 0.008983;

    fn equator_square() -> Ring {
        ring_of(&[
            (0.0, 0.0),
            (KM_DEG, 0.0),
            (KM_DEG, KM_DEG),
            (0.0, KM_DEG),
        ])
    }

    #[test]
    fn test_planar_area_unit_square() {
        let ring = ring_of(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!((planar_signed_area(&ring) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_planar_area_sign_flips_on_reversal() {
        let ring = ring_of(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let reversed = Ring::new(ring.points.iter().rev().copied().collect());
        assert!((planar_signed_area(&ring) + planar_signed_area(&reversed)).abs() < 1e-12);
    }

    #[test]
    fn test_geodesic_area_equator_square() {
        // A ~1 km x 1 km square at the equator is ~1e6 m².
        let area = geodesic_signed_area(&equator_square());
        assert!(area > 0.0);
        assert!((area - 1_000_000.0).abs() / 1_000_000.0 < 0.02);
    }

    #[test]
    fn test_geodesic_area_reversal_invariance() {
        let ring = equator_square();
        let reversed = Ring::new(ring.points.iter().rev().copied().collect());
        let forward = geodesic_signed_area(&ring);
        let backward = geodesic_signed_area(&reversed);
        assert!((forward + backward).abs() < 1e-6);
        assert!((forward.abs() - backward.abs()).abs() < 1e-6);
    }

    #[test]
    fn test_geodesic_area_rotation_invariance() {
        let ring = equator_square();
        let mut rotated_points = ring.points.clone();
        rotated_points.rotate_left(2);
        let rotated = Ring::new(rotated_points);
        assert!((geodesic_signed_area(&ring) - geodesic_signed_area(&rotated)).abs() < 1e-6);
    }

    #[test]
    fn test_ring_centroid_unit_square() {
        let ring = ring_of(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let centroid = ring_centroid(&ring).unwrap();
        assert!((centroid.x - 0.5).abs() < 1e-12);
        assert!((centroid.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ring_centroid_degenerate() {
        let ring = ring_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(ring_centroid(&ring).is_none());
    }

    #[test]
    fn test_combine_zero_area_fails() {
        let collinear = ring_of(&[(0.0, 0.0), (0.001, 0.001), (0.002, 0.002)]);
        let err = combine_rings(vec![collinear], &SurfaceContext::default()).unwrap_err();
        assert!(err.to_string().contains("zero area"));
    }

    #[test]
    fn test_combine_no_usable_rings_fails() {
        let stub = ring_of(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = combine_rings(vec![stub], &SurfaceContext::default()).unwrap_err();
        assert!(err.to_string().contains("at least 3 points"));
    }

    #[test]
    fn test_combine_two_shells_sum() {
        let first = equator_square();
        let second = Ring::new(
            first
                .points
                .iter()
                .map(|p| Point::new(p.x + 10.0 * KM_DEG, p.y))
                .collect(),
        );

        let single = combine_rings(vec![first.clone()], &SurfaceContext::default()).unwrap();
        let both = combine_rings(vec![first, second], &SurfaceContext::default()).unwrap();

        assert_eq!(both.ring_count, 2);
        assert!((both.area_sq_meters - 2.0 * single.area_sq_meters).abs() < 1.0);
    }

    #[test]
    fn test_combine_hole_subtracts() {
        let shell = equator_square();
        // Opposite winding: a hole covering the inner quarter.
        let hole = ring_of(&[
            (KM_DEG * 0.25, KM_DEG * 0.25),
            (KM_DEG * 0.25, KM_DEG * 0.75),
            (KM_DEG * 0.75, KM_DEG * 0.75),
            (KM_DEG * 0.75, KM_DEG * 0.25),
        ]);

        let shell_only = combine_rings(vec![shell.clone()], &SurfaceContext::default()).unwrap();
        let with_hole = combine_rings(vec![shell, hole], &SurfaceContext::default()).unwrap();

        let expected = shell_only.area_sq_meters * 0.75;
        assert!((with_hole.area_sq_meters - expected).abs() / expected < 0.01);
    }

    #[test]
    fn test_combine_projected_scales_by_unit_factor() {
        let ring = ring_of(&[
            (500000.0, 100000.0),
            (501000.0, 100000.0),
            (501000.0, 101000.0),
            (500000.0, 101000.0),
        ]);
        let native = planar_signed_area(&ring).abs();

        let context = SurfaceContext {
            unit_hint: Some("PROJCS[\"local\",UNIT[\"foot\",0.3048]]".to_string()),
            companion_centroid: Some(LatLon::new(41.2, -103.5)),
        };
        let combined = combine_rings(vec![ring], &context).unwrap();

        assert!((combined.area_sq_meters - native * 0.3048 * 0.3048).abs() < 1e-6);
        assert_eq!(combined.centroid, LatLon::new(41.2, -103.5));
    }

    #[test]
    fn test_combine_projected_without_centroid_fails() {
        let ring = ring_of(&[
            (500000.0, 100000.0),
            (501000.0, 100000.0),
            (501000.0, 101000.0),
        ]);
        let err = combine_rings(vec![ring], &SurfaceContext::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("projected"));
        assert!(message.contains("WGS84"));
    }

    #[test]
    fn test_resolve_unit_factor() {
        assert_eq!(resolve_unit_factor(None).unwrap(), 1.0);
        assert_eq!(resolve_unit_factor(Some("")).unwrap(), 1.0);
        assert_eq!(resolve_unit_factor(Some("UNIT[\"meter\"]")).unwrap(), 1.0);
        assert_eq!(resolve_unit_factor(Some("UNIT[\"foot\"]")).unwrap(), 0.3048);
        assert_eq!(
            resolve_unit_factor(Some("UNIT[\"US survey foot\"]")).unwrap(),
            0.3048006096012192
        );
        assert!(resolve_unit_factor(Some("UNIT[\"grad\"]")).is_err());
    }
}
