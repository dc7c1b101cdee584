//! Encoded polyline geometries.
//!
//! Directions providers ship route geometry in the compact encoded polyline
//! format. Decoding happens here, at the provider boundary, so the rest of
//! the planner only ever sees coordinate sequences.

use thiserror::Error;

use crate::model::Coordinate;

/// Precision used by Google and OpenRouteService encoded geometries.
pub const DEFAULT_PRECISION: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character at byte {0}")]
    InvalidCharacter(usize),
    #[error("polyline ends in the middle of a value")]
    Truncated,
}

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Decodes an encoded polyline with `precision` decimal digits.
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, PolylineError> {
        let factor = 10f64.powi(precision as i32);
        let bytes = encoded.as_bytes();
        let mut points = Vec::new();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;

        while index < bytes.len() {
            lat += next_value(bytes, &mut index)?;
            lng += next_value(bytes, &mut index)?;
            points.push(Coordinate::new(lat as f64 / factor, lng as f64 / factor));
        }

        Ok(Self { points })
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

/// Reads one zig-zag encoded delta starting at `index`.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidCharacter(*index));
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[Coordinate], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.latitude - e.0).abs() < 1e-9, "{:?} vs {:?}", a, e);
            assert!((a.longitude - e.1).abs() < 1e-9, "{:?} vs {:?}", a, e);
        }
    }

    #[test]
    fn test_decode_reference_polyline() {
        let polyline = Polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", DEFAULT_PRECISION).unwrap();
        assert_close(
            &polyline.into_points(),
            &[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)],
        );
    }

    #[test]
    fn test_decode_empty() {
        let polyline = Polyline::decode("", DEFAULT_PRECISION).unwrap();
        assert!(polyline.into_points().is_empty());
    }

    #[test]
    fn test_decode_truncated() {
        // Latitude without a longitude.
        assert_eq!(
            Polyline::decode("_p~iF", DEFAULT_PRECISION),
            Err(PolylineError::Truncated)
        );
    }

    #[test]
    fn test_decode_invalid_character() {
        assert_eq!(
            Polyline::decode("_p~iF ps|U", DEFAULT_PRECISION),
            Err(PolylineError::InvalidCharacter(5))
        );
    }
}
