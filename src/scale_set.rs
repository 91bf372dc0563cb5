//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! OGC Tile Matrix Set JSON encoding
//!
//! Serde model of the dictionary form defined by OGC 17-083r2. This is the
//! format of the embedded well-known scale set definitions as well as the
//! output of [`TileMatrixSet::to_definition`](crate::TileMatrixSet::to_definition);
//! both directions round-trip through the same structs.

/// Tile Matrix Set definition record
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSetDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBoxDefinition>,
    #[serde(rename = "supportedCRS")]
    pub supported_crs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_known_scale_set: Option<String>,
    pub tile_matrix: Vec<TileMatrixDefinition>,
}

/// Minimum bounding rectangle record, corners in (x, y) order
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBoxDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    pub lower_corner: (f64, f64),
    pub upper_corner: (f64, f64),
}

/// Per zoom level record
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Zoom level as decimal string, per the OGC encoding
    pub identifier: String,
    pub scale_denominator: f64,
    pub top_left_corner: (f64, f64),
    pub tile_width: u16,
    pub tile_height: u16,
    pub matrix_width: u32,
    pub matrix_height: u32,
}

/// A scale set definition plus grid interpretation metadata.
///
/// `is_global` is not part of the OGC dictionary; it marks definitions that
/// cover the whole globe in longitude and therefore wrap neighbor queries
/// over the antimeridian.
#[derive(PartialEq, Clone, Debug)]
pub struct ScaleSet {
    pub definition: ScaleSetDefinition,
    pub is_global: bool,
}
