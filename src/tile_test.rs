//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::crs::Crs;
use crate::error::Error;
use crate::tile::Tile;
use crate::tile_matrix::TileMatrixCfg;
use crate::tile_matrix_set::{TileMatrixSet, TileMatrixSetCfg, TilePyramid};
use crate::types::{Bounds, Shape, TileIndex};
use std::collections::BTreeSet;

fn index(zoom: u8, row: u32, col: u32) -> TileIndex {
    TileIndex { zoom, row, col }
}

fn ids(tiles: &[Tile]) -> BTreeSet<TileIndex> {
    tiles.iter().map(|tile| tile.id()).collect()
}

fn round_bounds(bounds: Bounds, digits: i32) -> (f64, f64, f64, f64) {
    let factor = 10f64.powi(digits);
    (
        (bounds.left * factor).round() / factor,
        (bounds.bottom * factor).round() / factor,
        (bounds.right * factor).round() / factor,
        (bounds.top * factor).round() / factor,
    )
}

#[test]
fn test_tile_geometry() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let tile = tp.tile(5, 5, 5).unwrap();
    assert_eq!(tile.id(), index(5, 5, 5));
    assert_eq!(tile.zoom(), 5);
    assert_eq!(
        tile.bounds(),
        Bounds {
            left: -151.875,
            bottom: 56.25,
            right: -146.25,
            top: 61.875,
        }
    );
    assert_eq!(tile.left(), -151.875);
    assert_eq!(tile.bottom(), 56.25);
    assert_eq!(tile.right(), -146.25);
    assert_eq!(tile.top(), 61.875);
    assert_eq!(tile.x_size(), 5.625);
    assert_eq!(tile.y_size(), 5.625);
    assert_eq!(
        tile.shape(),
        Shape {
            height: 256,
            width: 256,
        }
    );
    assert_eq!(tile.width(), 256);
    assert_eq!(tile.height(), 256);
    assert_eq!(tile.pixel_x_size(), 0.02197265625);
    assert_eq!(tile.pixel_y_size(), -0.02197265625);
    assert_eq!(format!("{}", tile), "Tile(5/5/5)");
}

#[test]
fn test_geo_transform() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let tile = tp.tile(5, 5, 5).unwrap();
    let transform = tile.geo_transform();
    assert_eq!(transform.origin_x, -151.875);
    assert_eq!(transform.origin_y, 61.875);
    assert_eq!(transform.pixel_x_size, 0.02197265625);
    assert_eq!(transform.pixel_y_size, -0.02197265625);
    assert_eq!(transform.x_skew, 0.0);
    assert_eq!(transform.pixel_to_crs(0.0, 0.0), (-151.875, 61.875));
    assert_eq!(transform.pixel_to_crs(256.0, 256.0), (-146.25, 56.25));
}

#[test]
fn test_crs84_tile_bounds() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    assert_eq!(
        round_bounds(tp.tile(0, 0, 0).unwrap().bounds(), 8),
        (-180.0, -90.0, 0.0, 90.0)
    );
    assert_eq!(
        round_bounds(tp.tile(0, 0, 1).unwrap().bounds(), 8),
        (0.0, -90.0, 180.0, 90.0)
    );
}

#[test]
fn test_web_mercator_tile_bounds() {
    let tp = TilePyramid::from_wkss(&json!("WebMercatorQuad")).unwrap();
    assert_eq!(
        round_bounds(tp.tile(0, 0, 0).unwrap().bounds(), 2),
        (-20037508.34, -20037508.34, 20037508.34, 20037508.34)
    );
    // reference values from the slippy map tile calculation for 10/486/332
    assert_eq!(
        round_bounds(tp.tile(10, 332, 486).unwrap().bounds(), 2),
        (-1017529.72, 7005300.77, -978393.96, 7044436.53)
    );
}

#[test]
fn test_invalid_tile_index() {
    let tp = TilePyramid::from_wkss(&json!("WebMercatorQuad")).unwrap();
    match tp.tile(0, 1, 0) {
        Err(Error::InvalidTileIndex(message)) => {
            assert!(message.contains("exceeds matrix height"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
    match tp.tile(0, 0, 1) {
        Err(Error::InvalidTileIndex(message)) => {
            assert!(message.contains("exceeds matrix width"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_parents_children() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let tile = tp.tile(5, 5, 5).unwrap();

    let children = tile.get_children().unwrap();
    assert_eq!(children.len(), 4);
    // top left, top right, bottom right, bottom left
    assert_eq!(children[0].id(), index(6, 10, 10));
    assert_eq!(children[1].id(), index(6, 10, 11));
    assert_eq!(children[2].id(), index(6, 11, 11));
    assert_eq!(children[3].id(), index(6, 11, 10));
    for child in &children {
        assert_eq!(child.get_parent().unwrap().unwrap().id(), tile.id());
    }

    assert_eq!(
        tile.get_parent().unwrap().unwrap().id(),
        tp.tile(4, 2, 2).unwrap().id()
    );

    let top_tile = tp.tile(0, 0, 0).unwrap();
    assert!(top_tile.get_parent().unwrap().is_none());

    // no matrix below the deepest zoom level
    let max_zoom = tp.max_zoom().unwrap();
    let deepest = tp.tile(max_zoom, 0, 0).unwrap();
    assert!(deepest.get_children().unwrap().is_empty());
}

#[test]
fn test_children_at_fringe() {
    // a next level too small for the full quad keeps only the covered tiles
    let cfg = TileMatrixSetCfg {
        identifier: "Shrunk".to_string(),
        title: None,
        abstract_: None,
        keywords: Vec::new(),
        crs: Crs::from_epsg(3857).unwrap(),
        bounds: None,
        is_global: false,
        well_known_scale_set: None,
        tile_matrices: vec![
            TileMatrixCfg {
                identifier: 0,
                scale_denominator: 559082264.028717,
                top_left_corner: (-20037508.3427892, 20037508.3427892),
                tile_width: 256,
                tile_height: 256,
                matrix_width: 1,
                matrix_height: 1,
            },
            TileMatrixCfg {
                identifier: 1,
                scale_denominator: 279541132.0143585,
                top_left_corner: (-20037508.3427892, 20037508.3427892),
                tile_width: 256,
                tile_height: 256,
                matrix_width: 2,
                matrix_height: 1,
            },
        ],
    };
    let tms = TileMatrixSet::new(cfg).unwrap();
    let children = tms.tile(0, 0, 0).unwrap().get_children().unwrap();
    assert_eq!(ids(&children), [index(1, 0, 0), index(1, 0, 1)].iter().copied().collect());
}

#[test]
fn test_neighbors() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let tile = tp.tile(5, 5, 5).unwrap();

    let neighbors = tile.get_neighbors(4).unwrap();
    assert_eq!(
        ids(&neighbors),
        [
            index(5, 4, 5),
            index(5, 6, 5),
            index(5, 5, 4),
            index(5, 5, 6),
        ]
        .iter()
        .copied()
        .collect()
    );

    let neighbors = tile.get_neighbors(8).unwrap();
    assert_eq!(neighbors.len(), 8);
    assert_eq!(
        ids(&neighbors),
        [
            index(5, 4, 5),
            index(5, 6, 5),
            index(5, 5, 4),
            index(5, 5, 6),
            index(5, 4, 4),
            index(5, 4, 6),
            index(5, 6, 4),
            index(5, 6, 6),
        ]
        .iter()
        .copied()
        .collect()
    );

    match tile.get_neighbors(3) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(tile.get_neighbors(0).is_err());
}

#[test]
fn test_neighbors_antimeridian() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let tile = tp.tile(3, 1, 0).unwrap();

    // the westward candidates wrap to the last column
    assert_eq!(
        ids(&tile.get_neighbors(8).unwrap()),
        [
            index(3, 0, 0),
            index(3, 1, 1),
            index(3, 2, 0),
            index(3, 1, 15),
            index(3, 0, 1),
            index(3, 2, 1),
            index(3, 2, 15),
            index(3, 0, 15),
        ]
        .iter()
        .copied()
        .collect()
    );
    assert_eq!(
        ids(&tile.get_neighbors(4).unwrap()),
        [
            index(3, 0, 0),
            index(3, 1, 1),
            index(3, 2, 0),
            index(3, 1, 15),
        ]
        .iter()
        .copied()
        .collect()
    );

    // wrapping left and right reaches the same tile exactly once
    let tile = tp.tile(0, 0, 0).unwrap();
    let neighbors = tile.get_neighbors(8).unwrap();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].id(), index(0, 0, 1));

    // single tile at the current zoom level
    let tp = TilePyramid::from_wkss(&json!("WebMercatorQuad")).unwrap();
    let neighbors = tp.tile(0, 0, 0).unwrap().get_neighbors(8).unwrap();
    assert!(neighbors.is_empty());
}

#[test]
fn test_neighbors_not_wrapped() {
    // no wraparound on a non-global scale set
    let tp = TilePyramid::from_wkss(&json!("EuropeanETRS89_LAEAQuad")).unwrap();
    let tile = tp.tile(3, 1, 0).unwrap();
    assert_eq!(
        ids(&tile.get_neighbors(8).unwrap()),
        [
            index(3, 0, 0),
            index(3, 1, 1),
            index(3, 2, 0),
            index(3, 0, 1),
            index(3, 2, 1),
        ]
        .iter()
        .copied()
        .collect()
    );
    assert_eq!(
        ids(&tile.get_neighbors(4).unwrap()),
        [index(3, 0, 0), index(3, 1, 1), index(3, 2, 0)]
            .iter()
            .copied()
            .collect()
    );

    // other way round
    let tile = tp.tile(3, 1, 7).unwrap();
    assert_eq!(
        ids(&tile.get_neighbors(8).unwrap()),
        [
            index(3, 0, 7),
            index(3, 1, 6),
            index(3, 2, 7),
            index(3, 0, 6),
            index(3, 2, 6),
        ]
        .iter()
        .copied()
        .collect()
    );
}

#[test]
fn test_tile_equality() {
    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    assert_eq!(tp.tile(5, 5, 5).unwrap(), tp.tile(5, 5, 5).unwrap());
    assert_ne!(tp.tile(5, 5, 5).unwrap(), tp.tile(5, 5, 6).unwrap());

    // same index in an independently constructed set is a different tile
    let other = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    assert_ne!(tp.tile(5, 5, 5).unwrap(), other.tile(5, 5, 5).unwrap());
}

#[test]
fn test_tile_hashing() {
    use std::collections::HashSet;

    let tp = TilePyramid::from_wkss(&json!("WorldCRS84Quad")).unwrap();
    let mut seen = HashSet::new();
    assert!(seen.insert(tp.tile(5, 5, 5).unwrap()));
    assert!(!seen.insert(tp.tile(5, 5, 5).unwrap()));
    assert!(seen.insert(tp.tile(5, 5, 6).unwrap()));
}
