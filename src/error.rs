//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error types

use thiserror::Error;

/// Errors raised at construction or lookup time. None of these are
/// transient; every failure is a deterministic consequence of invalid input.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// CRS could not be resolved or is not supported
    #[error("invalid CRS: {0}")]
    InvalidCrs(String),
    /// Tile row/col out of range for the addressed matrix
    #[error("invalid tile index: {0}")]
    InvalidTileIndex(String),
    /// No tile matrix with the given identifier in the set
    #[error("no tile matrix for zoom {0}")]
    InvalidTileMatrixIndex(u8),
    /// Well-known scale set identifier not in the registry
    #[error("unknown well-known scale set '{0}'")]
    UnknownScaleSet(String),
    /// Any other malformed or unsupported input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
