//! Geographic calculations

use crate::types::Coordinates;

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate Haversine distance between two points in meters
pub fn haversine_meters(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Planar bearing of `to` as seen from `from`, in radians (`atan2(Δlat, Δlng)`).
///
/// Only used to order points around a depot, so no spherical correction.
pub fn bearing_angle(from: &Coordinates, to: &Coordinates) -> f64 {
    (to.lat - from.lat).atan2(to.lng - from.lng)
}

/// Total length in meters of a path visiting `points` in order
pub fn path_length_meters(points: &[Coordinates]) -> f64 {
    points
        .windows(2)
        .map(|leg| haversine_meters(&leg[0], &leg[1]))
        .sum()
}

/// Calculate distance matrix between all points, in meters.
/// `matrix[i][j]` is the distance from point i to point j.
pub fn distance_matrix(points: &[Coordinates]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = haversine_meters(&points[i], &points[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn san_juan() -> Coordinates {
        Coordinates { lat: 18.4655, lng: -66.1057 }
    }

    fn ponce() -> Coordinates {
        Coordinates { lat: 18.0111, lng: -66.6141 }
    }

    #[test]
    fn test_haversine_san_juan_ponce() {
        let distance = haversine_meters(&san_juan(), &ponce());

        // San Juan to Ponce is approximately 74 km in a straight line
        assert!((distance - 74_000.0).abs() < 2_000.0, "got {} m", distance);
    }

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinates { lat: 18.2, lng: -66.0 };
        assert!(haversine_meters(&point, &point).abs() < 0.001);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let ab = haversine_meters(&san_juan(), &ponce());
        let ba = haversine_meters(&ponce(), &san_juan());
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_angle_quadrants() {
        let origin = Coordinates { lat: 0.0, lng: 0.0 };

        let east = bearing_angle(&origin, &Coordinates { lat: 0.0, lng: 1.0 });
        let north = bearing_angle(&origin, &Coordinates { lat: 1.0, lng: 0.0 });
        let south = bearing_angle(&origin, &Coordinates { lat: -1.0, lng: 0.0 });

        assert!(east.abs() < 1e-12);
        assert!((north - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((south + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_path_length_sums_legs() {
        let path = vec![san_juan(), ponce(), san_juan()];
        let expected = 2.0 * haversine_meters(&san_juan(), &ponce());
        assert!((path_length_meters(&path) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_path_length_of_single_point_is_zero() {
        assert_eq!(path_length_meters(&[san_juan()]), 0.0);
        assert_eq!(path_length_meters(&[]), 0.0);
    }

    #[test]
    fn test_distance_matrix() {
        let points = vec![
            Coordinates { lat: 18.0, lng: -66.0 },
            Coordinates { lat: 18.1, lng: -66.1 },
            Coordinates { lat: 18.2, lng: -66.2 },
        ];

        let matrix = distance_matrix(&points);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[0].len(), 3);

        // Diagonal should be zero
        for i in 0..3 {
            assert!(matrix[i][i].abs() < 0.001);
        }

        // Should be symmetric
        assert!((matrix[0][1] - matrix[1][0]).abs() < 0.001);
        assert!((matrix[0][2] - haversine_meters(&points[0], &points[2])).abs() < 0.001);
    }
}
