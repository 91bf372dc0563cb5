//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix of one zoom level

use crate::crs::Crs;
use crate::error::Error;
use crate::tile::Tile;
use crate::tile_matrix_set::TileMatrixSet;
use crate::types::{round_to_precision, Bounds, Shape};

/// Standardized rendering pixel size in millimeters (OGC 17-083r2). Scale
/// denominators relate map scale to a physical 0.28 mm x 0.28 mm pixel.
pub const STANDARDIZED_PIXEL_SIZE_MM: f64 = 0.28;

/// CRS units per pixel for an OGC scale denominator.
///
/// `pixel_size = scale_denominator * 10^-3 * 0.28 / meters_per_unit`, where
/// geographic reference systems convert through the length of one degree of
/// longitude at the equator. The result is rounded to the shared fixed
/// precision so that repeated derivations of the same nominal grid match
/// exactly.
pub fn pixel_size(scale_denominator: f64, crs: &Crs) -> Result<f64, Error> {
    if !scale_denominator.is_finite() || scale_denominator <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "scale denominator must be positive, not {}",
            scale_denominator
        )));
    }
    Ok(round_to_precision(
        scale_denominator * 1e-3 * STANDARDIZED_PIXEL_SIZE_MM / crs.meters_per_unit(),
    ))
}

/// Parameters of one zoom level, as enumerated by the OGC standard
#[derive(PartialEq, Clone, Debug)]
pub struct TileMatrixCfg {
    /// Zoom level, unique within the owning set
    pub identifier: u8,
    /// OGC scale denominator for this level
    pub scale_denominator: f64,
    /// (x, y) of the matrix origin in CRS units
    pub top_left_corner: (f64, f64),
    /// Pixels per tile along x
    pub tile_width: u16,
    /// Pixels per tile along y
    pub tile_height: u16,
    /// Tile columns
    pub matrix_width: u32,
    /// Tile rows
    pub matrix_height: u32,
}

/// One zoom level of a tile matrix set: the grid shape, tile shape, derived
/// pixel sizes and bounding box. Immutable once constructed.
#[derive(PartialEq, Clone, Debug)]
pub struct TileMatrix {
    identifier: u8,
    crs: Crs,
    scale_denominator: f64,
    top_left_corner: (f64, f64),
    tile_width: u16,
    tile_height: u16,
    matrix_width: u32,
    matrix_height: u32,
    pixel_x_size: f64,
    pixel_y_size: f64,
    matrix_bounds: Bounds,
    bounds: Bounds,
}

impl TileMatrix {
    /// Build a tile matrix from its parameter record.
    ///
    /// `bounds` is the owning set's clipping bounds; without an override the
    /// matrix is bounded by its own tile-aligned extent.
    pub fn new(
        cfg: &TileMatrixCfg,
        crs: &Crs,
        bounds: Option<&Bounds>,
    ) -> Result<TileMatrix, Error> {
        if cfg.tile_width == 0 || cfg.tile_height == 0 {
            return Err(Error::InvalidArgument(format!(
                "tile matrix {}: tile shape must be positive ({}x{})",
                cfg.identifier, cfg.tile_height, cfg.tile_width
            )));
        }
        if cfg.matrix_width == 0 || cfg.matrix_height == 0 {
            return Err(Error::InvalidArgument(format!(
                "tile matrix {}: matrix shape must be positive ({}x{})",
                cfg.identifier, cfg.matrix_height, cfg.matrix_width
            )));
        }
        let pixel_x_size = pixel_size(cfg.scale_denominator, crs)?;
        let pixel_y_size = -pixel_x_size;
        let (left, top) = cfg.top_left_corner;
        let right = round_to_precision(
            left + (pixel_x_size * cfg.tile_width as f64) * cfg.matrix_width as f64,
        );
        let bottom = round_to_precision(
            top + (pixel_y_size * cfg.tile_height as f64) * cfg.matrix_height as f64,
        );
        let matrix_bounds = Bounds::new(left, bottom, right, top)?;
        Ok(TileMatrix {
            identifier: cfg.identifier,
            crs: crs.clone(),
            scale_denominator: cfg.scale_denominator,
            top_left_corner: cfg.top_left_corner,
            tile_width: cfg.tile_width,
            tile_height: cfg.tile_height,
            matrix_width: cfg.matrix_width,
            matrix_height: cfg.matrix_height,
            pixel_x_size,
            pixel_y_size,
            matrix_bounds,
            bounds: bounds.copied().unwrap_or(matrix_bounds),
        })
    }

    /// Zoom level identifier
    pub fn id(&self) -> u8 {
        self.identifier
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn scale_denominator(&self) -> f64 {
        self.scale_denominator
    }

    /// (x, y) of the matrix origin
    pub fn top_left_corner(&self) -> (f64, f64) {
        self.top_left_corner
    }

    /// Tile width in pixels
    pub fn tile_width(&self) -> u16 {
        self.tile_width
    }

    /// Tile height in pixels
    pub fn tile_height(&self) -> u16 {
        self.tile_height
    }

    /// Tile shape in pixels
    pub fn tile_shape(&self) -> Shape {
        Shape {
            height: self.tile_height,
            width: self.tile_width,
        }
    }

    /// Number of tile columns
    pub fn matrix_width(&self) -> u32 {
        self.matrix_width
    }

    /// Number of tile rows
    pub fn matrix_height(&self) -> u32 {
        self.matrix_height
    }

    /// Grid shape as (rows, columns) in tile counts
    pub fn matrix_shape(&self) -> (u32, u32) {
        (self.matrix_height, self.matrix_width)
    }

    /// Pixel width in CRS units
    pub fn pixel_x_size(&self) -> f64 {
        self.pixel_x_size
    }

    /// Pixel height in CRS units (negative, y grows downwards)
    pub fn pixel_y_size(&self) -> f64 {
        self.pixel_y_size
    }

    /// Extent spanned by the full tile grid
    pub fn matrix_bounds(&self) -> Bounds {
        self.matrix_bounds
    }

    /// Effective clipping bounds: the owning set's bounds if overridden,
    /// else [`matrix_bounds`](Self::matrix_bounds)
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Tile factory. Tiles navigate through the owning set, which therefore
    /// has to be passed in; validation failures propagate unchanged.
    pub fn tile<'a>(
        &'a self,
        set: &'a TileMatrixSet,
        row: u32,
        col: u32,
    ) -> Result<Tile<'a>, Error> {
        Tile::new(set, self, row, col)
    }

    /// Parameter record this matrix was built from
    pub fn to_cfg(&self) -> TileMatrixCfg {
        TileMatrixCfg {
            identifier: self.identifier,
            scale_denominator: self.scale_denominator,
            top_left_corner: self.top_left_corner,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            matrix_width: self.matrix_width,
            matrix_height: self.matrix_height,
        }
    }
}
