//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::Error;
use crate::scale_set::ScaleSetDefinition;
use crate::wkss::{available_wkss, get_wkss};

#[test]
fn test_registry() {
    assert_eq!(
        available_wkss(),
        vec![
            "EuropeanETRS89_LAEAQuad",
            "WebMercatorQuad",
            "WorldCRS84Quad",
            "WorldMercatorWGS84Quad",
        ]
    );
    for name in available_wkss() {
        let scale_set = get_wkss(name).unwrap();
        assert_eq!(scale_set.definition.identifier, name);
        assert!(!scale_set.definition.tile_matrix.is_empty());
    }
}

#[test]
fn test_wkss_definitions() {
    let merc = get_wkss("WebMercatorQuad").unwrap();
    assert!(merc.is_global);
    assert_eq!(merc.definition.tile_matrix.len(), 25);
    assert_eq!(
        merc.definition.supported_crs,
        "http://www.opengis.net/def/crs/EPSG/0/3857"
    );
    assert_eq!(
        merc.definition.well_known_scale_set.as_deref(),
        Some("http://www.opengis.net/def/wkss/OGC/1.0/GoogleMapsCompatible")
    );
    let level0 = &merc.definition.tile_matrix[0];
    assert_eq!(level0.identifier, "0");
    assert_eq!(level0.scale_denominator, 559082264.028717);
    assert_eq!(level0.top_left_corner, (-20037508.3427892, 20037508.3427892));
    assert_eq!(level0.tile_width, 256);
    assert_eq!(level0.matrix_width, 1);

    let crs84 = get_wkss("WorldCRS84Quad").unwrap();
    assert!(crs84.is_global);
    assert_eq!(crs84.definition.tile_matrix.len(), 18);
    assert_eq!(crs84.definition.tile_matrix[0].matrix_width, 2);
    assert_eq!(crs84.definition.tile_matrix[0].matrix_height, 1);
    let bbox = crs84.definition.bounding_box.as_ref().unwrap();
    assert_eq!(bbox.lower_corner, (-180.0, -90.0));
    assert_eq!(bbox.upper_corner, (180.0, 90.0));

    let laea = get_wkss("EuropeanETRS89_LAEAQuad").unwrap();
    assert!(!laea.is_global);
    assert_eq!(laea.definition.tile_matrix.len(), 16);
    assert_eq!(
        laea.definition.supported_crs,
        "http://www.opengis.net/def/crs/EPSG/0/3035"
    );

    let wgs84_merc = get_wkss("WorldMercatorWGS84Quad").unwrap();
    assert!(wgs84_merc.is_global);
    assert_eq!(wgs84_merc.definition.tile_matrix.len(), 18);
}

#[test]
fn test_unknown_wkss() {
    match get_wkss("NoSuchQuad") {
        Err(Error::UnknownScaleSet(name)) => assert_eq!(name, "NoSuchQuad"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_definition_json_roundtrip() {
    for name in available_wkss() {
        let definition = get_wkss(name).unwrap().definition;
        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json["identifier"], json!(name));
        assert!(json["tileMatrix"][0]["scaleDenominator"].is_f64());
        assert!(json["tileMatrix"][0]["topLeftCorner"].is_array());
        let reparsed: ScaleSetDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(reparsed, definition);
    }
}
