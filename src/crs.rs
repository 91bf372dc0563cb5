//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate reference system handles

use crate::error::Error;
use std::fmt;

/// Meters per degree of longitude at the equator (Earth radius 6378137 m)
pub const METERS_PER_DEGREE: f64 = 6378137.0 * 2.0 * std::f64::consts::PI / 360.0;

/// CRS linear units
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Unit {
    Meters,
    Degrees,
    Feet,
}

/// Resolved coordinate reference system.
///
/// Carries the authority/code pair and the linear unit classification needed
/// for scale denominator conversions. Resolution happens against a fixed
/// registry of known codes; everything else fails with an invalid CRS error.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Crs {
    authority: &'static str,
    code: &'static str,
    unit: Unit,
}

/// Registry of resolvable reference systems
const KNOWN_CRS: &[(&str, &str, Unit)] = &[
    ("EPSG", "3857", Unit::Meters),  // WGS 84 / Pseudo-Mercator
    ("EPSG", "3395", Unit::Meters),  // WGS 84 / World Mercator
    ("EPSG", "3035", Unit::Meters),  // ETRS89-extended / LAEA Europe
    ("EPSG", "2056", Unit::Meters),  // CH1903+ / LV95
    ("EPSG", "4326", Unit::Degrees), // WGS 84
    ("EPSG", "4258", Unit::Degrees), // ETRS89
    ("EPSG", "2249", Unit::Feet),    // NAD83 / Massachusetts Mainland (ftUS)
    ("OGC", "CRS84", Unit::Degrees), // WGS 84 longitude/latitude
];

impl Crs {
    /// Resolve a CRS from an OGC URL (`http://www.opengis.net/def/crs/EPSG/0/3857`),
    /// an OGC URN (`urn:ogc:def:crs:EPSG::3857`, `urn:ogc:def:crs:OGC:1.3:CRS84`)
    /// or an `AUTHORITY:CODE` string (`EPSG:3857`, `CRS84` defaults to OGC).
    pub fn from_user_input(input: &str) -> Result<Crs, Error> {
        let input = input.trim();
        let (authority, code) = if let Some(path) = input.strip_prefix("http://www.opengis.net/def/crs/")
        {
            // authority/version/code
            let mut parts = path.split('/');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(auth), Some(_version), Some(code)) => (auth.to_string(), code.to_string()),
                _ => return Err(Error::InvalidCrs(format!("unparseable CRS URL '{}'", input))),
            }
        } else if let Some(path) = input.strip_prefix("urn:ogc:def:crs:") {
            // authority:version:code, version may be empty
            let mut parts = path.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(auth), Some(_version), Some(code)) => (auth.to_string(), code.to_string()),
                _ => return Err(Error::InvalidCrs(format!("unparseable CRS URN '{}'", input))),
            }
        } else if let Some((auth, code)) = split_auth_code(input) {
            (auth.to_string(), code.to_string())
        } else {
            ("OGC".to_string(), input.to_string())
        };
        Crs::resolve(&authority, &code)
            .ok_or_else(|| Error::InvalidCrs(format!("unknown reference system '{}'", input)))
    }

    /// Resolve an EPSG code
    pub fn from_epsg(code: u32) -> Result<Crs, Error> {
        Crs::resolve("EPSG", &code.to_string())
            .ok_or_else(|| Error::InvalidCrs(format!("unknown EPSG code {}", code)))
    }

    fn resolve(authority: &str, code: &str) -> Option<Crs> {
        KNOWN_CRS
            .iter()
            .find(|(auth, c, _)| auth.eq_ignore_ascii_case(authority) && *c == code)
            .map(|&(authority, code, unit)| Crs {
                authority,
                code,
                unit,
            })
    }

    pub fn authority(&self) -> &str {
        self.authority
    }

    pub fn code(&self) -> &str {
        self.code
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Longitude/latitude reference system?
    pub fn is_geographic(&self) -> bool {
        self.unit == Unit::Degrees
    }

    /// Conversion factor from one CRS unit to meters. Geographic systems use
    /// the length of one degree of longitude at the equator.
    pub fn meters_per_unit(&self) -> f64 {
        match self.unit {
            Unit::Meters => 1.0,
            Unit::Degrees => METERS_PER_DEGREE,
            Unit::Feet => 0.3048,
        }
    }

    /// Canonical OGC URL form
    pub fn to_url(&self) -> String {
        match self.authority {
            "OGC" => format!("http://www.opengis.net/def/crs/OGC/1.3/{}", self.code),
            _ => format!("http://www.opengis.net/def/crs/{}/0/{}", self.authority, self.code),
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

fn split_auth_code(value: &str) -> Option<(&str, &str)> {
    let mut parts = value.splitn(2, ':');
    match (parts.next(), parts.next()) {
        (Some(auth), Some(code)) if !auth.is_empty() && !code.is_empty() => Some((auth, code)),
        _ => None,
    }
}

#[test]
fn test_crs_parsing() {
    let merc = Crs::from_user_input("http://www.opengis.net/def/crs/EPSG/0/3857").unwrap();
    assert_eq!(merc.to_string(), "EPSG:3857");
    assert!(!merc.is_geographic());
    assert_eq!(merc.meters_per_unit(), 1.0);

    assert_eq!(Crs::from_user_input("urn:ogc:def:crs:EPSG::3395").unwrap(), Crs::from_epsg(3395).unwrap());
    assert_eq!(
        Crs::from_user_input("EPSG:4326").unwrap().unit(),
        Unit::Degrees
    );

    let crs84 = Crs::from_user_input("urn:ogc:def:crs:OGC:1.3:CRS84").unwrap();
    assert!(crs84.is_geographic());
    assert_eq!(crs84.meters_per_unit(), 111319.49079327358);
    assert_eq!(crs84.to_url(), "http://www.opengis.net/def/crs/OGC/1.3/CRS84");
    assert_eq!(Crs::from_user_input("CRS84").unwrap(), crs84);
}

#[test]
fn test_crs_errors() {
    assert!(Crs::from_user_input("EPSG:999999").is_err());
    assert!(Crs::from_user_input("no such thing").is_err());
    assert!(Crs::from_epsg(1).is_err());
    match Crs::from_user_input("invalid") {
        Err(Error::InvalidCrs(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_feet_unit() {
    let ftus = Crs::from_epsg(2249).unwrap();
    assert_eq!(ftus.unit(), Unit::Feet);
    assert_eq!(ftus.meters_per_unit(), 0.3048);
}
