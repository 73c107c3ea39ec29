//! Region geometry loading from GeoJSON.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Geometry, JsonValue, Value};
use rayon::prelude::*;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::catalog::{self, Region};
use crate::map::{MapRenderer, RegionShape, Ring};

/// Properties that may carry a FIPS join key, in lookup order
const JOIN_KEY_PROPERTIES: [&str; 4] = ["STATEFP", "STATE", "GEOID", "fips"];

/// Load geometry from a file path or an http(s) URL and build a renderer.
/// Without a source every catalog region gets a placeholder square.
pub fn load_renderer(source: Option<&str>, runtime: &Runtime, timeout: Duration) -> Result<MapRenderer> {
    let Some(source) = source else {
        info!("no geometry source configured, using placeholder shapes");
        return Ok(MapRenderer::placeholders());
    };

    let content = if source.starts_with("http://") || source.starts_with("https://") {
        runtime.block_on(fetch_text(source, timeout))?
    } else {
        fs::read_to_string(Path::new(source)).with_context(|| format!("reading {source}"))?
    };

    let shapes = parse_shapes(&content).with_context(|| format!("parsing geometry from {source}"))?;
    let matched = shapes.iter().filter(|s| s.region.is_some()).count();
    info!(shapes = shapes.len(), matched, %source, "geometry loaded");
    if shapes.is_empty() {
        bail!("{source} contains no polygon features");
    }
    Ok(MapRenderer::new(shapes))
}

async fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let response = reqwest::Client::builder()
        .timeout(timeout)
        .build()?
        .get(url)
        .send()
        .await
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Parse a GeoJSON document into region shapes. Non-polygon features are skipped;
/// polygon features the catalog does not know are kept without a region.
pub fn parse_shapes(content: &str) -> Result<Vec<RegionShape>> {
    let geojson: GeoJson = content.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![Feature {
            bbox: None,
            geometry: Some(g),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    Ok(features
        .into_par_iter()
        .filter_map(|feature| {
            let region = feature_region(&feature);
            let polygons = feature.geometry.as_ref().map(polygons).unwrap_or_default();
            let shape = RegionShape::from_polygons(region, polygons);
            if shape.is_none() {
                debug!(id = ?feature.id, "skipping feature without polygons");
            }
            shape
        })
        .collect())
}

/// Resolve a feature to a catalog region by id, then FIPS properties, then name
fn feature_region(feature: &Feature) -> Option<&'static Region> {
    let by_id = feature.id.as_ref().and_then(|id| match id {
        Id::String(s) => catalog::lookup(s),
        Id::Number(n) => catalog::lookup(&n.to_string()),
    });
    if by_id.is_some() {
        return by_id;
    }

    let props = feature.properties.as_ref()?;
    JOIN_KEY_PROPERTIES
        .iter()
        .filter_map(|key| match props.get(*key)? {
            JsonValue::String(s) => catalog::lookup(s),
            JsonValue::Number(n) => catalog::lookup(&n.to_string()),
            _ => None,
        })
        .next()
        .or_else(|| props.get("name").and_then(JsonValue::as_str).and_then(catalog::by_label))
}

/// Collect polygons as `[outer, holes...]` ring lists
fn polygons(geometry: &Geometry) -> Vec<Vec<Ring>> {
    fn ring(coords: &[Vec<f64>]) -> Ring {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect()
    }

    match &geometry.value {
        Value::Polygon(rings) => vec![rings.iter().map(|r| ring(r)).collect()],
        Value::MultiPolygon(polys) => polys
            .iter()
            .map(|rings| rings.iter().map(|r| ring(r)).collect())
            .collect(),
        Value::GeometryCollection(geometries) => geometries.iter().flat_map(polygons).collect(),
        _ => Vec::new(),
    }
}
