//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix sets and tile pyramids

use crate::crs::Crs;
use crate::error::Error;
use crate::scale_set::{BoundingBoxDefinition, ScaleSetDefinition, TileMatrixDefinition};
use crate::tile::Tile;
use crate::tile_iterator::TileIterator;
use crate::tile_matrix::{TileMatrix, TileMatrixCfg};
use crate::types::Bounds;
use crate::wkss;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Deref;

/// Parameters of a tile matrix set
#[derive(PartialEq, Clone, Debug)]
pub struct TileMatrixSetCfg {
    /// Set identifier, e.g. a WKSS name
    pub identifier: String,
    pub title: Option<String>,
    pub abstract_: Option<String>,
    pub keywords: Vec<String>,
    /// Reference system shared by all tile matrices
    pub crs: Crs,
    /// Clipping bounds applied to all tile matrices; without an override
    /// every matrix is bounded by its own tile-aligned extent
    pub bounds: Option<Bounds>,
    /// Wrap neighbor queries over the antimeridian
    pub is_global: bool,
    /// Reference to the well-known scale set this configuration follows
    pub well_known_scale_set: Option<String>,
    /// One record per zoom level
    pub tile_matrices: Vec<TileMatrixCfg>,
}

/// An ordered collection of tile matrices sharing one CRS, keyed by integer
/// zoom identifier. Immutable once constructed.
#[derive(PartialEq, Clone, Debug)]
pub struct TileMatrixSet {
    identifier: String,
    title: Option<String>,
    abstract_: Option<String>,
    keywords: Vec<String>,
    crs: Crs,
    bounds: Option<Bounds>,
    is_global: bool,
    well_known_scale_set: Option<String>,
    matrices: BTreeMap<u8, TileMatrix>,
}

impl TileMatrixSet {
    /// Build a tile matrix set from its parameter record
    pub fn new(cfg: TileMatrixSetCfg) -> Result<TileMatrixSet, Error> {
        let mut matrices = BTreeMap::new();
        for matrix_cfg in &cfg.tile_matrices {
            let matrix = TileMatrix::new(matrix_cfg, &cfg.crs, cfg.bounds.as_ref())?;
            if matrices.insert(matrix_cfg.identifier, matrix).is_some() {
                return Err(Error::InvalidArgument(format!(
                    "duplicate tile matrix identifier {}",
                    matrix_cfg.identifier
                )));
            }
        }
        debug!(
            "assembled tile matrix set '{}' with {} tile matrices",
            cfg.identifier,
            matrices.len()
        );
        Ok(TileMatrixSet {
            identifier: cfg.identifier,
            title: cfg.title,
            abstract_: cfg.abstract_,
            keywords: cfg.keywords,
            crs: cfg.crs,
            bounds: cfg.bounds,
            is_global: cfg.is_global,
            well_known_scale_set: cfg.well_known_scale_set,
            matrices,
        })
    }

    /// Construct from a well-known scale set.
    ///
    /// `wkss` is either an identifier string (see [`available_wkss`](crate::available_wkss))
    /// or a definition object in the OGC dictionary encoding. Any other JSON
    /// value is rejected. For definition objects the antimeridian wrapping
    /// flag is recovered from the registry when the identifier matches a
    /// registered set.
    pub fn from_wkss(wkss: &Value) -> Result<TileMatrixSet, Error> {
        match wkss {
            Value::String(name) => {
                let scale_set = wkss::get_wkss(name)?;
                TileMatrixSet::from_definition(&scale_set.definition, scale_set.is_global)
            }
            Value::Object(_) => {
                let definition: ScaleSetDefinition = serde_json::from_value(wkss.clone())
                    .map_err(|e| {
                        Error::InvalidArgument(format!("malformed scale set definition: {}", e))
                    })?;
                let is_global = wkss::is_global(&definition.identifier);
                TileMatrixSet::from_definition(&definition, is_global)
            }
            other => Err(Error::InvalidArgument(format!(
                "WKSS must be an identifier string or a definition object, not {}",
                other
            ))),
        }
    }

    /// Construct from a parsed OGC definition record
    pub fn from_definition(
        definition: &ScaleSetDefinition,
        is_global: bool,
    ) -> Result<TileMatrixSet, Error> {
        let crs = Crs::from_user_input(&definition.supported_crs)?;
        let bounds = match &definition.bounding_box {
            Some(bbox) => Some(Bounds::new(
                bbox.lower_corner.0,
                bbox.lower_corner.1,
                bbox.upper_corner.0,
                bbox.upper_corner.1,
            )?),
            None => None,
        };
        let tile_matrices = definition
            .tile_matrix
            .iter()
            .map(|level| {
                let identifier = level.identifier.parse::<u8>().map_err(|_| {
                    Error::InvalidArgument(format!(
                        "tile matrix identifier must be an integer, not '{}'",
                        level.identifier
                    ))
                })?;
                Ok(TileMatrixCfg {
                    identifier,
                    scale_denominator: level.scale_denominator,
                    top_left_corner: level.top_left_corner,
                    tile_width: level.tile_width,
                    tile_height: level.tile_height,
                    matrix_width: level.matrix_width,
                    matrix_height: level.matrix_height,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        TileMatrixSet::new(TileMatrixSetCfg {
            identifier: definition.identifier.clone(),
            title: definition.title.clone(),
            abstract_: definition.abstract_.clone(),
            keywords: definition.keywords.clone(),
            crs,
            bounds,
            is_global,
            well_known_scale_set: definition.well_known_scale_set.clone(),
            tile_matrices,
        })
    }

    /// Re-emit the set as an OGC definition record, suitable for
    /// serialization and re-ingestion through [`from_wkss`](Self::from_wkss)
    pub fn to_definition(&self) -> ScaleSetDefinition {
        ScaleSetDefinition {
            type_name: Some("TileMatrixSetType".to_string()),
            identifier: self.identifier.clone(),
            title: self.title.clone(),
            abstract_: self.abstract_.clone(),
            keywords: self.keywords.clone(),
            bounding_box: self.bounds.map(|bounds| BoundingBoxDefinition {
                type_name: Some("BoundingBoxType".to_string()),
                crs: Some(self.crs.to_url()),
                lower_corner: (bounds.left, bounds.bottom),
                upper_corner: (bounds.right, bounds.top),
            }),
            supported_crs: self.crs.to_url(),
            well_known_scale_set: self.well_known_scale_set.clone(),
            tile_matrix: self
                .matrices
                .values()
                .map(|matrix| TileMatrixDefinition {
                    type_name: Some("TileMatrixType".to_string()),
                    identifier: matrix.id().to_string(),
                    scale_denominator: matrix.scale_denominator(),
                    top_left_corner: matrix.top_left_corner(),
                    tile_width: matrix.tile_width(),
                    tile_height: matrix.tile_height(),
                    matrix_width: matrix.matrix_width(),
                    matrix_height: matrix.matrix_height(),
                })
                .collect(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Reference system shared by all tile matrices
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Explicit clipping bounds, if overridden
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether neighbor queries wrap over the antimeridian
    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn well_known_scale_set(&self) -> Option<&str> {
        self.well_known_scale_set.as_deref()
    }

    /// Number of tile matrices
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Tile matrices in ascending zoom order
    pub fn matrices(&self) -> impl Iterator<Item = &TileMatrix> {
        self.matrices.values()
    }

    /// Zoom identifiers in ascending order
    pub fn zoom_levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.matrices.keys().copied()
    }

    pub fn min_zoom(&self) -> Option<u8> {
        self.matrices.keys().next().copied()
    }

    pub fn max_zoom(&self) -> Option<u8> {
        self.matrices.keys().next_back().copied()
    }

    /// Tile matrix of a zoom level
    pub fn matrix(&self, zoom: u8) -> Result<&TileMatrix, Error> {
        self.matrices
            .get(&zoom)
            .ok_or(Error::InvalidTileMatrixIndex(zoom))
    }

    /// Tile of this set
    pub fn tile(&self, zoom: u8, row: u32, col: u32) -> Result<Tile, Error> {
        self.matrix(zoom)?.tile(self, row, col)
    }

    /// Number of tile columns at a zoom level
    pub fn matrix_width(&self, zoom: u8) -> Result<u32, Error> {
        Ok(self.matrix(zoom)?.matrix_width())
    }

    /// Number of tile rows at a zoom level
    pub fn matrix_height(&self, zoom: u8) -> Result<u32, Error> {
        Ok(self.matrix(zoom)?.matrix_height())
    }

    /// Pixel width in CRS units at a zoom level
    pub fn pixel_x_size(&self, zoom: u8) -> Result<f64, Error> {
        Ok(self.matrix(zoom)?.pixel_x_size())
    }

    /// Pixel height in CRS units at a zoom level (negative)
    pub fn pixel_y_size(&self, zoom: u8) -> Result<f64, Error> {
        Ok(self.matrix(zoom)?.pixel_y_size())
    }

    /// Row-major iterator over all tile indexes of the zoom range
    /// `min_zoom..=max_zoom`. Zoom levels without a matrix are skipped; an
    /// empty range yields an empty iterator.
    pub fn tile_iterator(&self, min_zoom: u8, max_zoom: u8) -> TileIterator {
        if min_zoom > max_zoom {
            return TileIterator::new(Vec::new());
        }
        let levels = self
            .matrices
            .range(min_zoom..=max_zoom)
            .map(|(&zoom, matrix)| (zoom, matrix.matrix_height(), matrix.matrix_width()))
            .collect();
        TileIterator::new(levels)
    }
}

/// A tile matrix set whose tile matrices double in shape and halve in pixel
/// size between consecutive zoom levels, like an image pyramid.
///
/// Structurally identical to [`TileMatrixSet`]; construction additionally
/// verifies the doubling relation, which quadtree navigation
/// ([`Tile::get_parent`], [`Tile::get_children`]) relies on.
#[derive(PartialEq, Clone, Debug)]
pub struct TilePyramid(TileMatrixSet);

impl TilePyramid {
    /// Build a tile pyramid from its parameter record, verifying the
    /// doubling relation between zoom levels
    pub fn new(cfg: TileMatrixSetCfg) -> Result<TilePyramid, Error> {
        let set = TileMatrixSet::new(cfg)?;
        verify_doubling(&set)?;
        Ok(TilePyramid(set))
    }

    /// Construct from a well-known scale set; accepts the same input as
    /// [`TileMatrixSet::from_wkss`]
    pub fn from_wkss(wkss: &Value) -> Result<TilePyramid, Error> {
        let set = TileMatrixSet::from_wkss(wkss)?;
        verify_doubling(&set)?;
        Ok(TilePyramid(set))
    }

    pub fn as_tile_matrix_set(&self) -> &TileMatrixSet {
        &self.0
    }

    pub fn into_tile_matrix_set(self) -> TileMatrixSet {
        self.0
    }
}

impl Deref for TilePyramid {
    type Target = TileMatrixSet;

    fn deref(&self) -> &TileMatrixSet {
        &self.0
    }
}

/// Verify that matrix shapes double and pixel sizes halve between
/// consecutive zoom identifiers (scaled by `2^gap` across identifier gaps)
fn verify_doubling(set: &TileMatrixSet) -> Result<(), Error> {
    const RELATIVE_TOLERANCE: f64 = 1e-9;
    let matrices: Vec<&TileMatrix> = set.matrices().collect();
    for pair in matrices.windows(2) {
        let (coarse, fine) = (pair[0], pair[1]);
        let gap = (fine.id() - coarse.id()) as u32;
        if gap >= 32 {
            return Err(Error::InvalidArgument(format!(
                "zoom gap between tile matrices {} and {} too large for a pyramid",
                coarse.id(),
                fine.id()
            )));
        }
        let factor = 1u64 << gap;
        if fine.matrix_width() as u64 != coarse.matrix_width() as u64 * factor
            || fine.matrix_height() as u64 != coarse.matrix_height() as u64 * factor
        {
            return Err(Error::InvalidArgument(format!(
                "matrix shape does not double between tile matrices {} ({}x{}) and {} ({}x{})",
                coarse.id(),
                coarse.matrix_height(),
                coarse.matrix_width(),
                fine.id(),
                fine.matrix_height(),
                fine.matrix_width()
            )));
        }
        let expected = coarse.pixel_x_size() / factor as f64;
        if (fine.pixel_x_size() - expected).abs() > expected * RELATIVE_TOLERANCE {
            return Err(Error::InvalidArgument(format!(
                "pixel size does not halve between tile matrices {} and {}",
                coarse.id(),
                fine.id()
            )));
        }
    }
    Ok(())
}
