//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! A library for OGC tile matrix set and tile pyramid calculations
//!
//! ## Well-known scale sets
//!
//! ```rust
//! use tile_pyramid::TilePyramid;
//! use serde_json::json;
//!
//! let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
//! assert_eq!(tp.matrix_width(0).unwrap(), 2);
//! assert_eq!(tp.matrix_height(0).unwrap(), 1);
//!
//! let tile = tp.tile(5, 5, 5).unwrap();
//! assert_eq!(tile.left(), -151.875);
//! assert_eq!(tile.top(), 61.875);
//! assert_eq!(tile.right(), -146.25);
//! assert_eq!(tile.bottom(), 56.25);
//! ```
//!
//! ## Quadtree and neighbor navigation
//!
//! ```rust
//! use tile_pyramid::TilePyramid;
//! use serde_json::json;
//!
//! let tp = TilePyramid::from_wkss(&json!("WebMercatorQuad")).unwrap();
//! let tile = tp.tile(3, 2, 2).unwrap();
//! assert_eq!(tile.get_parent().unwrap().unwrap().id(), tp.tile(2, 1, 1).unwrap().id());
//! assert_eq!(tile.get_children().unwrap().len(), 4);
//! assert_eq!(tile.get_neighbors(8).unwrap().len(), 8);
//! ```
//!
//! ## Custom tile matrix sets
//!
//! Sets are built from typed per-level parameter records; the OGC JSON
//! dictionary encoding is supported for ingestion and re-serialization via
//! [`TileMatrixSet::from_wkss`] and [`TileMatrixSet::to_definition`].

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;

mod crs;
mod error;
mod scale_set;
mod tile;
mod tile_iterator;
mod tile_matrix;
mod tile_matrix_set;
mod types;
mod wkss;
#[cfg(test)]
mod scale_set_test;
#[cfg(test)]
mod tile_test;

pub use crate::crs::{Crs, Unit, METERS_PER_DEGREE};
pub use crate::error::Error;
pub use crate::scale_set::{
    BoundingBoxDefinition, ScaleSet, ScaleSetDefinition, TileMatrixDefinition,
};
pub use crate::tile::Tile;
pub use crate::tile_iterator::TileIterator;
pub use crate::tile_matrix::{pixel_size, TileMatrix, TileMatrixCfg, STANDARDIZED_PIXEL_SIZE_MM};
pub use crate::tile_matrix_set::{TileMatrixSet, TileMatrixSetCfg, TilePyramid};
pub use crate::types::{Bounds, GeoTransform, Shape, TileIndex, PRECISION};
pub use crate::wkss::{available_wkss, get_wkss};
