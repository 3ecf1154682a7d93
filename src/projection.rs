use std::f64::consts::PI;

use geo_types::{coord, Coord};

/// Half the side of the Web Mercator square, in meters.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = 20037508.34;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    WebMercator,
    Geographic,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::WebMercator => "EPSG:3857",
            Self::Geographic => "EPSG:4326",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EPSG:3857" => Some(Self::WebMercator),
            "EPSG:4326" => Some(Self::Geographic),
            _ => None,
        }
    }
}

/// Meters in EPSG:3857 to (longitude, latitude) degrees in EPSG:4326.
pub fn to_geographic(coord: Coord<f64>) -> Coord<f64> {
    let lon = coord.x * 180.0 / WEB_MERCATOR_HALF_EXTENT;
    let lat = coord.y * 180.0 / WEB_MERCATOR_HALF_EXTENT;
    let lat = (lat * (PI / 180.0)).exp().atan() * 360.0 / PI - 90.0;

    coord! { x: lon, y: lat }
}

/// (longitude, latitude) degrees in EPSG:4326 to meters in EPSG:3857.
pub fn to_web_mercator(coord: Coord<f64>) -> Coord<f64> {
    let x = coord.x * WEB_MERCATOR_HALF_EXTENT / 180.0;
    let y = ((90.0 + coord.y) * PI / 360.0).tan().ln() / (PI / 180.0);
    let y = y * WEB_MERCATOR_HALF_EXTENT / 180.0;

    coord! { x: x, y: y }
}

pub fn transform(coord: Coord<f64>, from: Projection, to: Projection) -> Coord<f64> {
    match (from, to) {
        (Projection::WebMercator, Projection::Geographic) => to_geographic(coord),
        (Projection::Geographic, Projection::WebMercator) => to_web_mercator(coord),
        _ => coord,
    }
}

pub fn format_xy(coord: Coord<f64>, precision: usize) -> String {
    format!("{:.*}, {:.*}", precision, coord.x, precision, coord.y)
}
