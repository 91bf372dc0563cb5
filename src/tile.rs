//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Addressable tiles

use crate::error::Error;
use crate::tile_matrix::TileMatrix;
use crate::tile_matrix_set::TileMatrixSet;
use crate::types::{round_to_precision, Bounds, GeoTransform, Shape, TileIndex};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Neighbor offsets (row, col), 4-connected part first:
///
/// ```text
/// -------------
/// | 8 | 1 | 5 |
/// -------------
/// | 4 | x | 2 |
/// -------------
/// | 7 | 3 | 6 |
/// -------------
/// ```
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, 0), // 1: above
    (0, 1),  // 2: right
    (1, 0),  // 3: below
    (0, -1), // 4: left
    (-1, 1), // 5: above right
    (1, 1),  // 6: below right
    (1, -1), // 7: below left
    (-1, -1), // 8: above left
];

/// One cell of a tile matrix.
///
/// Tiles are constructed on demand and never cached; they borrow their tile
/// matrix and the owning set, both of which outlive them. All geometry is
/// derived at construction from the matrix parameters.
#[derive(Clone, Debug)]
pub struct Tile<'a> {
    set: &'a TileMatrixSet,
    matrix: &'a TileMatrix,
    index: TileIndex,
    bounds: Bounds,
}

impl<'a> Tile<'a> {
    pub(crate) fn new(
        set: &'a TileMatrixSet,
        matrix: &'a TileMatrix,
        row: u32,
        col: u32,
    ) -> Result<Tile<'a>, Error> {
        if row >= matrix.matrix_height() {
            return Err(Error::InvalidTileIndex(format!(
                "tile row ({}) exceeds matrix height ({})",
                row,
                matrix.matrix_height()
            )));
        }
        if col >= matrix.matrix_width() {
            return Err(Error::InvalidTileIndex(format!(
                "tile col ({}) exceeds matrix width ({})",
                col,
                matrix.matrix_width()
            )));
        }
        let (matrix_left, matrix_top) = matrix.top_left_corner();
        let tile_x_span = matrix.pixel_x_size() * matrix.tile_width() as f64;
        let tile_y_span = matrix.pixel_y_size() * matrix.tile_height() as f64;
        // each edge is rounded from the unrounded products, never derived
        // from an already rounded neighbor
        let top = round_to_precision(matrix_top + row as f64 * tile_y_span);
        let bottom = round_to_precision(matrix_top + (row + 1) as f64 * tile_y_span);
        let left = round_to_precision(matrix_left + col as f64 * tile_x_span);
        let right = round_to_precision(matrix_left + (col + 1) as f64 * tile_x_span);
        let bounds = Bounds::new(left, bottom, right, top)?;
        Ok(Tile {
            set,
            matrix,
            index: TileIndex {
                zoom: matrix.id(),
                row,
                col,
            },
            bounds,
        })
    }

    /// Unique tile index
    pub fn id(&self) -> TileIndex {
        self.index
    }

    /// Zoom level / tile matrix identifier
    pub fn zoom(&self) -> u8 {
        self.index.zoom
    }

    /// Row within the tile matrix
    pub fn row(&self) -> u32 {
        self.index.row
    }

    /// Column within the tile matrix
    pub fn col(&self) -> u32 {
        self.index.col
    }

    /// The tile matrix this tile belongs to
    pub fn tile_matrix(&self) -> &TileMatrix {
        self.matrix
    }

    /// Bounding coordinates in CRS units
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn left(&self) -> f64 {
        self.bounds.left
    }

    pub fn bottom(&self) -> f64 {
        self.bounds.bottom
    }

    pub fn right(&self) -> f64 {
        self.bounds.right
    }

    pub fn top(&self) -> f64 {
        self.bounds.top
    }

    /// Tile width in CRS units
    pub fn x_size(&self) -> f64 {
        self.bounds.width()
    }

    /// Tile height in CRS units
    pub fn y_size(&self) -> f64 {
        self.bounds.height()
    }

    /// Pixel width in CRS units
    pub fn pixel_x_size(&self) -> f64 {
        self.matrix.pixel_x_size()
    }

    /// Pixel height in CRS units (negative)
    pub fn pixel_y_size(&self) -> f64 {
        self.matrix.pixel_y_size()
    }

    /// Tile shape in pixels
    pub fn shape(&self) -> Shape {
        self.matrix.tile_shape()
    }

    /// Tile width in pixels
    pub fn width(&self) -> u16 {
        self.matrix.tile_width()
    }

    /// Tile height in pixels
    pub fn height(&self) -> u16 {
        self.matrix.tile_height()
    }

    /// Affine transform locating this tile's pixels in CRS coordinates
    pub fn geo_transform(&self) -> GeoTransform {
        GeoTransform {
            origin_x: self.bounds.left,
            pixel_x_size: self.matrix.pixel_x_size(),
            x_skew: 0.0,
            origin_y: self.bounds.top,
            y_skew: 0.0,
            pixel_y_size: self.matrix.pixel_y_size(),
        }
    }

    /// Tile from the previous zoom level covering this tile.
    ///
    /// `Ok(None)` at the top of the hierarchy. Assumes the power-of-2
    /// quadtree relation between consecutive zoom levels; in a set that does
    /// not satisfy it, the parent index can be out of range and the
    /// resulting error propagates.
    pub fn get_parent(&self) -> Result<Option<Tile<'a>>, Error> {
        let zoom = match self.index.zoom.checked_sub(1) {
            Some(zoom) => zoom,
            None => return Ok(None),
        };
        match self.set.tile(zoom, self.index.row / 2, self.index.col / 2) {
            Ok(tile) => Ok(Some(tile)),
            Err(Error::InvalidTileMatrixIndex(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Tiles from the next zoom level covered by this tile.
    ///
    /// Up to 4 children in top-left, top-right, bottom-right, bottom-left
    /// order; fewer at the bottom-right fringe of a matrix with odd shape.
    /// Empty when there is no next zoom level.
    pub fn get_children(&self) -> Result<Vec<Tile<'a>>, Error> {
        let next_zoom = match self.index.zoom.checked_add(1) {
            Some(zoom) => zoom,
            None => return Ok(Vec::new()),
        };
        let next_matrix = match self.set.matrix(next_zoom) {
            Ok(matrix) => matrix,
            Err(_) => return Ok(Vec::new()),
        };
        [(0, 0), (0, 1), (1, 1), (1, 0)]
            .iter()
            .map(|&(row_offset, col_offset)| {
                (
                    self.index.row as u64 * 2 + row_offset,
                    self.index.col as u64 * 2 + col_offset,
                )
            })
            .filter(|&(row, col)| {
                row < next_matrix.matrix_height() as u64 && col < next_matrix.matrix_width() as u64
            })
            .map(|(row, col)| self.set.tile(next_zoom, row as u32, col as u32))
            .collect()
    }

    /// Neighboring tiles, unique and in offset order.
    ///
    /// `connectedness` selects the four direct neighbors or all eight.
    /// Candidates above or below the matrix are dropped; candidates across
    /// the left or right edge wrap over the antimeridian if the owning set
    /// is global, and are dropped otherwise. On narrow matrices the left and
    /// right wrap can reach the same cell, which is reported once, and a
    /// candidate equal to the tile itself is excluded.
    pub fn get_neighbors(&self, connectedness: u8) -> Result<Vec<Tile<'a>>, Error> {
        let offsets = match connectedness {
            4 => &NEIGHBOR_OFFSETS[..4],
            8 => &NEIGHBOR_OFFSETS[..],
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "only connectedness values 8 or 4 are allowed, not {}",
                    connectedness
                )))
            }
        };
        let matrix_height = self.matrix.matrix_height() as i64;
        let matrix_width = self.matrix.matrix_width() as i64;
        let mut unique: Vec<(u32, u32)> = Vec::with_capacity(offsets.len());
        for &(row_offset, col_offset) in offsets {
            let row = self.index.row as i64 + row_offset;
            // no vertical wraparound
            if row < 0 || row >= matrix_height {
                continue;
            }
            let mut col = self.index.col as i64 + col_offset;
            if col < 0 || col >= matrix_width {
                if !self.set.is_global() {
                    continue;
                }
                col = col.rem_euclid(matrix_width);
            }
            if row == self.index.row as i64 && col == self.index.col as i64 {
                continue;
            }
            let candidate = (row as u32, col as u32);
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
            .into_iter()
            .map(|(row, col)| self.set.tile(self.index.zoom, row, col))
            .collect()
    }
}

impl<'a> PartialEq for Tile<'a> {
    /// Tiles are equal iff they reference the same tile matrix and carry the
    /// same index
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.matrix, other.matrix) && self.index == other.index
    }
}

impl<'a> Eq for Tile<'a> {}

impl<'a> Hash for Tile<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<'a> fmt::Display for Tile<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tile({})", self.index)
    }
}
