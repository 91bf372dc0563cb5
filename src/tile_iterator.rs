//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile index iterators

use crate::types::TileIndex;

/// Row-major iterator over the tile indexes of a zoom range.
///
/// Created by [`TileMatrixSet::tile_iterator`](crate::TileMatrixSet::tile_iterator).
pub struct TileIterator {
    /// (zoom, rows, cols) per level, ascending zoom
    levels: Vec<(u8, u32, u32)>,
    level: usize,
    row: u32,
    col: u32,
    finished: bool,
}

impl TileIterator {
    pub(crate) fn new(levels: Vec<(u8, u32, u32)>) -> TileIterator {
        let finished = levels.is_empty();
        TileIterator {
            levels,
            level: 0,
            row: 0,
            col: 0,
            finished,
        }
    }
}

impl Iterator for TileIterator {
    type Item = TileIndex;

    fn next(&mut self) -> Option<TileIndex> {
        if self.finished {
            return None;
        }
        let (zoom, rows, cols) = self.levels[self.level];
        let current = TileIndex {
            zoom,
            row: self.row,
            col: self.col,
        };
        if self.col + 1 < cols {
            self.col += 1;
        } else if self.row + 1 < rows {
            self.row += 1;
            self.col = 0;
        } else if self.level + 1 < self.levels.len() {
            self.level += 1;
            self.row = 0;
            self.col = 0;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_tile_iterator() {
    use crate::tile_matrix_set::TilePyramid;

    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let indexes: Vec<TileIndex> = tp.tile_iterator(0, 1).collect();
    // 1x2 matrix at zoom 0, 2x4 matrix at zoom 1
    assert_eq!(indexes.len(), 10);
    assert_eq!(
        indexes[0],
        TileIndex {
            zoom: 0,
            row: 0,
            col: 0
        }
    );
    assert_eq!(
        indexes[1],
        TileIndex {
            zoom: 0,
            row: 0,
            col: 1
        }
    );
    assert_eq!(
        indexes[2],
        TileIndex {
            zoom: 1,
            row: 0,
            col: 0
        }
    );
    assert_eq!(
        indexes[9],
        TileIndex {
            zoom: 1,
            row: 1,
            col: 3
        }
    );
}

#[test]
fn test_tile_iterator_empty_range() {
    use crate::tile_matrix_set::TilePyramid;

    let tp = TilePyramid::from_wkss(&json!("WebMercatorQuad")).unwrap();
    assert_eq!(tp.tile_iterator(2, 1).count(), 0);
    assert_eq!(tp.tile_iterator(200, 220).count(), 0);
}
