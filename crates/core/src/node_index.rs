// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node index arrays carried on job records.
//!
//! The controller sends each array as a sentinel-terminated integer list
//! (`[0, 3, 7, 9, -1]`) with no stored length, or omits it entirely. The
//! list is scanned once, here, at the deserialization boundary; everything
//! downstream works with a bounded sequence and never sees the sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Terminator value for index arrays on the wire.
pub const SENTINEL: i64 = -1;

/// Indices into the controller's node table, usually start/end pairs.
///
/// `Absent` is distinct from an empty array: an absent array renders as
/// nothing at all, an empty present array renders as its terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Option<Vec<i64>>", into = "Option<Vec<i64>>")]
pub enum NodeIndices {
    #[default]
    Absent,
    Present(Vec<u32>),
}

impl NodeIndices {
    /// Build from a raw sentinel-terminated array.
    ///
    /// Stops at the first `-1`; anything after it is ignored. Fails if there
    /// is no terminator or an element before it is not a valid index.
    pub fn from_terminated(raw: &[i64]) -> Result<Self, ModelError> {
        let end = raw
            .iter()
            .position(|&v| v == SENTINEL)
            .ok_or(ModelError::UnterminatedIndexArray { len: raw.len() })?;

        let values = raw[..end]
            .iter()
            .map(|&v| u32::try_from(v).map_err(|_| ModelError::InvalidNodeIndex(v)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::Present(values))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Indices before the terminator (empty when absent).
    pub fn as_slice(&self) -> &[u32] {
        match self {
            Self::Absent => &[],
            Self::Present(values) => values,
        }
    }

    /// Re-encode in wire form, terminator included.
    pub fn to_terminated(&self) -> Option<Vec<i64>> {
        match self {
            Self::Absent => None,
            Self::Present(values) => Some(
                values
                    .iter()
                    .map(|&v| i64::from(v))
                    .chain(std::iter::once(SENTINEL))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<Option<Vec<i64>>> for NodeIndices {
    type Error = ModelError;

    fn try_from(raw: Option<Vec<i64>>) -> Result<Self, Self::Error> {
        match raw {
            None => Ok(Self::Absent),
            Some(raw) => Self::from_terminated(&raw),
        }
    }
}

impl From<NodeIndices> for Option<Vec<i64>> {
    fn from(indices: NodeIndices) -> Self {
        indices.to_terminated()
    }
}

/// Comma-joined indices followed by the `-1` terminator; empty when absent.
impl fmt::Display for NodeIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Present(values) = self else {
            return Ok(());
        };
        for v in values {
            write!(f, "{},", v)?;
        }
        write!(f, "{}", SENTINEL)
    }
}

#[cfg(test)]
#[path = "node_index_tests.rs"]
mod tests;
