//! Country boundary geometry loaded from a GeoJSON `FeatureCollection`.
//!
//! Features are keyed by country code: the feature `id` (as in the common
//! `world-countries.json`), falling back to an `iso_a3` / `ISO_A3` property.
//! Only `Polygon` and `MultiPolygon` geometries are kept; the boundaries are used for
//! rendering only and never computed over.

use crate::error::{DashError, Result};
use ahash::AHashMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Closed ring of `[lon, lat]` positions.
pub type Ring = Vec<[f64; 2]>;

/// Polygon rings are exterior first, then holes (GeoJSON order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Exterior ring of every polygon part.
    pub fn exterior_rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon(rings) => rings.first().into_iter().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().filter_map(|p| p.first()).collect(),
        }
    }

    /// `(min_lon, min_lat, max_lon, max_lat)`, or `None` for an empty geometry.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let mut it = self.exterior_rings().into_iter().flatten();
        let first = it.next()?;
        Some(it.fold(
            (first[0], first[1], first[0], first[1]),
            |(x0, y0, x1, y1), p| (x0.min(p[0]), y0.min(p[1]), x1.max(p[0]), y1.max(p[1])),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub name: Option<String>,
    pub geometry: Geometry,
}

/// Boundary geometry indexed by country code.
#[derive(Debug, Clone, Default)]
pub struct Boundaries {
    by_code: AHashMap<String, Boundary>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

// Positions may carry a third (altitude) component; it is dropped.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

fn to_ring(raw: Vec<Vec<f64>>) -> std::result::Result<Ring, String> {
    raw.into_iter()
        .map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Ok([*lon, *lat]),
            _ => Err(format!("position with {} coordinate(s)", pos.len())),
        })
        .collect()
}

fn to_polygon(raw: Vec<Vec<Vec<f64>>>) -> std::result::Result<Vec<Ring>, String> {
    raw.into_iter().map(to_ring).collect()
}

fn feature_code(f: &RawFeature) -> Option<String> {
    let from_id = f.id.as_ref().and_then(|v| v.as_str()).map(str::to_string);
    let from_props = || {
        let props = f.properties.as_ref()?;
        ["iso_a3", "ISO_A3"]
            .iter()
            .find_map(|k| props.get(*k).and_then(|v| v.as_str()))
            .map(str::to_string)
    };
    from_id
        .or_else(from_props)
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
}

impl Boundaries {
    /// Parse GeoJSON text. `origin` only labels errors.
    pub fn from_geojson_str(text: &str, origin: &Path) -> Result<Self> {
        let malformed = |reason: String| DashError::MissingResource {
            path: origin.to_path_buf(),
            reason,
        };
        let raw: RawCollection =
            serde_json::from_str(text).map_err(|e| malformed(format!("invalid GeoJSON: {e}")))?;
        if raw.kind != "FeatureCollection" {
            return Err(malformed(format!(
                "expected a FeatureCollection, found {}",
                raw.kind
            )));
        }

        let mut by_code = AHashMap::with_capacity(raw.features.len());
        for (idx, feature) in raw.features.into_iter().enumerate() {
            let Some(code) = feature_code(&feature) else {
                warn!("feature #{idx} has no country code, skipped");
                continue;
            };
            let geometry = match feature.geometry {
                Some(RawGeometry::Polygon { coordinates }) => {
                    Geometry::Polygon(to_polygon(coordinates).map_err(&malformed)?)
                }
                Some(RawGeometry::MultiPolygon { coordinates }) => Geometry::MultiPolygon(
                    coordinates
                        .into_iter()
                        .map(to_polygon)
                        .collect::<std::result::Result<_, _>>()
                        .map_err(&malformed)?,
                ),
                Some(RawGeometry::Unsupported) | None => {
                    warn!("feature {code} has no polygon geometry, skipped");
                    continue;
                }
            };
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .map(str::to_string);
            by_code.insert(code, Boundary { name, geometry });
        }
        Ok(Self { by_code })
    }

    /// Load a boundary file. Absent or malformed files fail with
    /// [`DashError::MissingResource`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DashError::MissingResource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let b = Self::from_geojson_str(&text, path)?;
        info!("loaded {} boundaries from {}", b.len(), path.display());
        Ok(b)
    }

    pub fn insert(&mut self, code: impl Into<String>, boundary: Boundary) {
        self.by_code.insert(code.into(), boundary);
    }

    pub fn get(&self, code: &str) -> Option<&Boundary> {
        self.by_code.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Country codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.by_code.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_bbox_covers_exterior_ring() {
        let g = Geometry::Polygon(vec![vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 5.0],
            [0.0, 5.0],
            [0.0, 0.0],
        ]]);
        assert_eq!(g.bbox(), Some((0.0, 0.0, 10.0, 5.0)));
        assert_eq!(Geometry::MultiPolygon(vec![]).bbox(), None);
    }

    #[test]
    fn code_falls_back_to_iso_a3_property() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"iso_a3":"fra","name":"France"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0,12],[1,0,12],[1,1,12],[0,0,12]]]}}
        ]}"#;
        let b = Boundaries::from_geojson_str(text, Path::new("inline")).unwrap();
        let fra = b.get("FRA").unwrap();
        assert_eq!(fra.name.as_deref(), Some("France"));
        assert_eq!(fra.geometry.exterior_rings()[0].len(), 4);
    }
}
