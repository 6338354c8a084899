// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted, compressed form of an alpha table.

use alloc::string::String;
use alloc::vec::Vec;

use miniz_oxide::deflate::compress_to_vec;
use miniz_oxide::inflate::decompress_to_vec;

use crate::{AlphaTable, MaskError};

/// Deflate level for stored tables. Alpha channels are full of long runs,
/// so the default level already compresses them close to their entropy.
const COMPRESSION_LEVEL: u8 = 6;

/// Persisted mask state: source fingerprint, dimensions, and the alpha
/// table compressed with raw deflate.
///
/// This is the only on-disk format the crate defines. The host's
/// persistence layer stores and restores it verbatim; `data` must inflate
/// to exactly `width * height` bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskRecord {
    /// Content fingerprint of the source bitmap the table was built from.
    pub fingerprint: String,
    /// Source bitmap width in pixels.
    pub width: u32,
    /// Source bitmap height in pixels.
    pub height: u32,
    /// Raw-deflate compressed alpha bytes; empty for an empty table.
    pub data: Vec<u8>,
}

impl MaskRecord {
    /// A record with no fingerprint and no pixels.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            fingerprint: String::new(),
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Compresses `table` into a persistable record.
    #[must_use]
    pub fn encode(table: &AlphaTable, fingerprint: impl Into<String>) -> Self {
        let data = if table.is_empty() {
            Vec::new()
        } else {
            compress_to_vec(table.data(), COMPRESSION_LEVEL)
        };
        Self {
            fingerprint: fingerprint.into(),
            width: table.width(),
            height: table.height(),
            data,
        }
    }

    /// Decompresses the record back into an [`AlphaTable`].
    ///
    /// An empty payload with empty dimensions is the empty table, not an
    /// error. Any other shape mismatch is reported so a truncated record
    /// cannot alias a smaller valid table.
    pub fn decode(&self) -> Result<AlphaTable, MaskError> {
        let expected = self.width as usize * self.height as usize;
        if self.data.is_empty() {
            return if expected == 0 {
                AlphaTable::new(self.width, self.height, Vec::new())
            } else {
                Err(MaskError::LengthMismatch {
                    expected,
                    actual: 0,
                })
            };
        }
        let raw = decompress_to_vec(&self.data).map_err(|_| MaskError::Corrupt)?;
        if raw.len() != expected {
            return Err(MaskError::LengthMismatch {
                expected,
                actual: raw.len(),
            });
        }
        AlphaTable::new(self.width, self.height, raw)
    }

    /// Whether the record carries no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
