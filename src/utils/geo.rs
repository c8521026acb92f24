//! Geodesic helpers for field boundaries drawn as [longitude, latitude] rings.
//!
//! Areas use the Chamberlain-Duquette spherical excess formula on the WGS84
//! mean radius. Good to well under a percent for field-sized polygons, which
//! is far inside the tolerance of any spray plan.

pub type Ring = Vec<[f64; 2]>;

/// WGS84 mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

const SQ_M_PER_HECTARE: f64 = 10_000.0;

/// Check a single ring: at least 3 distinct vertices, finite coordinates,
/// longitude in [-180, 180] and latitude in [-90, 90].
pub fn validate_ring(ring: &[[f64; 2]]) -> Result<(), String> {
    let mut distinct: Vec<[f64; 2]> = Vec::new();
    for point in ring {
        let [lon, lat] = *point;
        if !lon.is_finite() || !lat.is_finite() {
            return Err("Boundary contains non-finite coordinates".to_string());
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err("Boundary coordinates out of range".to_string());
        }
        if !distinct.contains(point) {
            distinct.push(*point);
        }
    }

    if distinct.len() < 3 {
        return Err("Boundary must have at least 3 distinct vertices".to_string());
    }

    Ok(())
}

/// Unsigned spherical area of one ring in square meters. The ring may be open
/// or explicitly closed; closure is implied.
pub fn ring_area_sq_m(ring: &[[f64; 2]]) -> f64 {
    // Drop an explicit closing vertex so the wrap-around edge is not doubled
    let mut points: &[[f64; 2]] = ring;
    if points.len() > 1 && points.first() == points.last() {
        points = &points[..points.len() - 1];
    }

    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let [lon1, lat1] = points[i];
        let [lon2, lat2] = points[(i + 1) % points.len()];

        let lambda1 = lon1.to_radians();
        let lambda2 = lon2.to_radians();
        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();

        sum += (lambda2 - lambda1) * (2.0 + phi1.sin() + phi2.sin());
    }

    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Area in hectares of a polygon given as rings: the first ring is the outer
/// boundary, any further rings are holes subtracted from it.
pub fn polygon_area_ha(rings: &[Ring]) -> Result<f64, String> {
    let outer = rings
        .first()
        .ok_or_else(|| "Boundary must contain at least one ring".to_string())?;
    validate_ring(outer)?;

    let mut area = ring_area_sq_m(outer);
    if area <= 0.0 {
        return Err("Boundary encloses no area".to_string());
    }

    for hole in &rings[1..] {
        validate_ring(hole)?;
        area -= ring_area_sq_m(hole);
    }

    if area <= 0.0 {
        return Err("Holes cover the entire boundary".to_string());
    }

    Ok(area / SQ_M_PER_HECTARE)
}

/// Arithmetic-mean centroid of the outer ring as (latitude, longitude).
/// Accurate enough at field scale for travel-distance estimates.
pub fn centroid(ring: &[[f64; 2]]) -> (f64, f64) {
    let mut points: &[[f64; 2]] = ring;
    if points.len() > 1 && points.first() == points.last() {
        points = &points[..points.len() - 1];
    }
    if points.is_empty() {
        return (0.0, 0.0);
    }

    let n = points.len() as f64;
    let lon = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let lat = points.iter().map(|p| p[1]).sum::<f64>() / n;
    (lat, lon)
}

/// Great-circle distance in kilometers between two (lat, lon) points.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at_equator() -> Ring {
        // 0.01 x 0.01 degree square anchored at the equator
        vec![
            [0.0, 0.0],
            [0.01, 0.0],
            [0.01, 0.01],
            [0.0, 0.01],
            [0.0, 0.0],
        ]
    }

    #[test]
    fn test_square_area_near_equator() {
        // Analytic spherical area of a lon/lat rectangle:
        // R^2 * d_lambda * (sin(phi2) - sin(phi1)) ~= 1_236_404 m^2
        let area = ring_area_sq_m(&square_at_equator());
        let expected = 1_236_404.0;
        assert!(
            (area - expected).abs() / expected < 0.005,
            "area was {area}"
        );
    }

    #[test]
    fn test_open_and_closed_rings_agree() {
        let closed = square_at_equator();
        let open = closed[..closed.len() - 1].to_vec();
        assert_eq!(ring_area_sq_m(&closed), ring_area_sq_m(&open));
    }

    #[test]
    fn test_polygon_area_subtracts_holes() {
        let outer = square_at_equator();
        let hole: Ring = vec![
            [0.002, 0.002],
            [0.008, 0.002],
            [0.008, 0.008],
            [0.002, 0.008],
        ];
        let with_hole = polygon_area_ha(&[outer.clone(), hole]).unwrap();
        let without = polygon_area_ha(&[outer]).unwrap();
        assert!(with_hole < without);
        assert!(with_hole > 0.0);
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let line: Ring = vec![[0.0, 0.0], [0.01, 0.0], [0.0, 0.0]];
        assert!(polygon_area_ha(&[line]).is_err());

        let dupes: Ring = vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        assert!(validate_ring(&dupes).is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let bad: Ring = vec![[0.0, 0.0], [190.0, 0.0], [0.0, 1.0]];
        assert!(validate_ring(&bad).is_err());

        let nan: Ring = vec![[0.0, 0.0], [f64::NAN, 0.0], [0.0, 1.0]];
        assert!(validate_ring(&nan).is_err());
    }

    #[test]
    fn test_haversine_paris_to_london() {
        let d = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 343.5).abs() < 2.0, "distance was {d}");
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_km(10.0, 10.0, 10.0, 10.0) < 1e-9);
    }

    #[test]
    fn test_centroid_of_square() {
        let (lat, lon) = centroid(&square_at_equator());
        assert!((lat - 0.005).abs() < 1e-9);
        assert!((lon - 0.005).abs() < 1e-9);
    }
}
