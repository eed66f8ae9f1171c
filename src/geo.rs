use serde::Serialize;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance using the haversine formula on a spherical Earth.
/// Input lat/lon in degrees. Output in kilometers.
///
/// Coordinates are not range-checked. Values outside [-90, 90] / [-180, 180]
/// still go through the trigonometry and yield a finite, non-negative number,
/// it just doesn't correspond to any place on the map.
pub fn haversine_km(a: Position, b: Position) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        a.lat.to_radians(),
        a.lon.to_radians(),
        b.lat.to_radians(),
        b.lon.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding (or out-of-range latitudes) can push h outside [0, 1].
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Squared euclidean distance in raw degree space.
///
/// Only good for ranking candidates at continental scale. It disagrees with
/// `haversine_km` near the poles and across the antimeridian.
pub fn planar_sq(a: Position, b: Position) -> f64 {
    let dlat = a.lat - b.lat;
    let dlon = a.lon - b.lon;
    dlat * dlat + dlon * dlon
}
