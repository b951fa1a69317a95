//! Google Maps direction links for an ordered route
//!
//! Google Maps caps the number of points per link, so long routes are split
//! into consecutive windows sharing their boundary point. Repeated points
//! (the depot at both ends, two jobs at one address) are nudged apart a few
//! meters so every stop stays a distinct waypoint.

use std::collections::HashMap;

use crate::types::Coordinates;

pub const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Degrees of latitude per meter
const LAT_DEG_PER_M: f64 = 1.0 / 110_574.0;
/// Degrees of longitude per meter at roughly 18°N
const LNG_DEG_PER_M: f64 = 1.0 / (111_320.0 * 0.949);

fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}

fn dedup_key(c: &Coordinates) -> String {
    format!("{:.8},{:.8}", c.lat, c.lng)
}

/// Offset for the `n`-th repeat (n ≥ 1) of a point, growing with `n`
fn jitter(c: &Coordinates, n: usize) -> Coordinates {
    let dx_sign = if n % 2 == 1 { 1.0 } else { -1.0 };
    let dy_sign = if n % 3 != 0 { 1.0 } else { -1.0 };

    let dx = dx_sign * 6.0 * LNG_DEG_PER_M * (1 + n / 2) as f64 * 0.4;
    let dy = dy_sign * 6.0 * LAT_DEG_PER_M * (1 + n / 3) as f64 * 0.6;

    Coordinates {
        lat: round8(c.lat + dy),
        lng: round8(c.lng + dx),
    }
}

/// Copy of `path` where every repeated point is moved slightly
pub fn distinct_waypoints(path: &[Coordinates]) -> Vec<Coordinates> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    path.iter()
        .map(|c| {
            let count = seen.entry(dedup_key(c)).or_insert(0);
            let repeat = *count;
            *count += 1;
            if repeat == 0 { *c } else { jitter(c, repeat) }
        })
        .collect()
}

/// Index ranges `[start, end]` of consecutive windows of at most
/// `max_points` points, each starting where the previous one ended
pub fn windows(len: usize, max_points: usize) -> Vec<(usize, usize)> {
    let step = max_points.saturating_sub(1).max(1);
    let mut ranges = Vec::new();
    let mut start = 0;

    while start + 1 < len {
        let end = (start + step).min(len - 1);
        ranges.push((start, end));
        start = end;
    }

    ranges
}

fn encode_point(c: &Coordinates) -> String {
    urlencoding::encode(&format!("{},{}", c.lat, c.lng)).into_owned()
}

/// Directions link through `points` (first = origin, last = destination)
fn directions_url(points: &[Coordinates]) -> Option<String> {
    let (origin, rest) = points.split_first()?;
    let (destination, waypoints) = rest.split_last()?;

    let mut url = format!(
        "{}&origin={}&destination={}",
        MAPS_DIRECTIONS_URL,
        encode_point(origin),
        encode_point(destination)
    );

    if !waypoints.is_empty() {
        let joined = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lat, c.lng))
            .collect::<Vec<_>>()
            .join("|");
        url.push_str("&waypoints=");
        url.push_str(&urlencoding::encode(&joined));
    }

    url.push_str("&travelmode=driving");
    Some(url)
}

/// Navigation links covering `path` in order
pub fn maps_urls(path: &[Coordinates], max_points: usize) -> Vec<String> {
    let points = distinct_waypoints(path);

    windows(points.len(), max_points)
        .into_iter()
        .filter_map(|(start, end)| directions_url(&points[start..=end]))
        .collect()
}
