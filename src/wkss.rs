//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Well-known scale set registry
//!
//! Fixed lookup table of predefined Tile Matrix Set definitions, embedded as
//! OGC JSON documents:
//!
//! - `EuropeanETRS89_LAEAQuad`: Lambert Azimuthal Equal Area ETRS89 for Europe
//! - `WebMercatorQuad`: Google Maps Compatible for the World
//! - `WorldCRS84Quad`: CRS84 for the World
//! - `WorldMercatorWGS84Quad`: World Mercator WGS84 (ellipsoid)
//!
//! All but the European LAEA set cover the full longitude range and wrap
//! neighbor queries over the antimeridian.

use crate::error::Error;
use crate::scale_set::{ScaleSet, ScaleSetDefinition};

/// Registered definitions: name, JSON document, global coverage flag
const WKSS: &[(&str, &str, bool)] = &[
    (
        "EuropeanETRS89_LAEAQuad",
        include_str!("wkss/EuropeanETRS89_LAEAQuad.json"),
        false,
    ),
    (
        "WebMercatorQuad",
        include_str!("wkss/WebMercatorQuad.json"),
        true,
    ),
    (
        "WorldCRS84Quad",
        include_str!("wkss/WorldCRS84Quad.json"),
        true,
    ),
    (
        "WorldMercatorWGS84Quad",
        include_str!("wkss/WorldMercatorWGS84Quad.json"),
        true,
    ),
];

/// Names of all registered well-known scale sets, in registry order
pub fn available_wkss() -> Vec<&'static str> {
    WKSS.iter().map(|&(name, _, _)| name).collect()
}

/// Look up a well-known scale set by name
pub fn get_wkss(name: &str) -> Result<ScaleSet, Error> {
    let &(_, json, is_global) = WKSS
        .iter()
        .find(|&&(wkss_name, _, _)| wkss_name == name)
        .ok_or_else(|| Error::UnknownScaleSet(name.to_string()))?;
    let definition: ScaleSetDefinition = serde_json::from_str(json)
        .map_err(|e| Error::InvalidArgument(format!("malformed scale set definition: {}", e)))?;
    debug!("loaded well-known scale set '{}'", name);
    Ok(ScaleSet {
        definition,
        is_global,
    })
}

/// Global coverage flag for a registered definition identifier
pub(crate) fn is_global(identifier: &str) -> bool {
    WKSS.iter()
        .find(|&&(name, _, _)| name == identifier)
        .map(|&(_, _, is_global)| is_global)
        .unwrap_or(false)
}
