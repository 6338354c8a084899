// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy decompression and fingerprint-keyed invalidation.

use alloc::string::String;

use crate::{AlphaTable, MaskError, MaskRecord};

/// Source bitmap provider collaborator.
///
/// Implemented by the host's asset layer and consulted only when a mask is
/// rebuilt (authoring time), never on the per-query path.
pub trait BitmapSource {
    /// Returns the alpha bitmap for the asset `id`, or `None` when the
    /// asset is missing or unreadable.
    fn alpha_bitmap(&self, id: &str) -> Option<AlphaTable>;
}

/// A persisted record plus its lazily decompressed table.
///
/// The record is the durable state; the table is derived and rebuilt on
/// demand. Rebuilding is keyed by the source fingerprint: [`MaskCache::refresh`]
/// is a no-op while the fingerprint matches the one the record was built
/// from. Lazy decompression makes [`MaskCache::table`] a read-modify-write,
/// so shared use across threads must be serialized by the caller.
#[derive(Clone, Debug, Default)]
pub struct MaskCache {
    record: MaskRecord,
    table: Option<AlphaTable>,
}

impl MaskCache {
    /// Wraps a restored record; decompression happens on first access.
    #[must_use]
    pub const fn new(record: MaskRecord) -> Self {
        Self {
            record,
            table: None,
        }
    }

    /// A cache with no pixels and no fingerprint.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(MaskRecord::empty())
    }

    /// The persisted record in its current form.
    #[must_use]
    pub const fn record(&self) -> &MaskRecord {
        &self.record
    }

    /// Fingerprint of the source the record was built from.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.record.fingerprint
    }

    /// Drops the decompressed table; the record stays.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    /// Replaces the record and invalidates the decompressed table.
    pub fn set_record(&mut self, record: MaskRecord) {
        self.record = record;
        self.invalidate();
    }

    /// Re-derives the compressed record from `table`.
    pub fn rebuild(&mut self, fingerprint: impl Into<String>, table: &AlphaTable) {
        self.set_record(MaskRecord::encode(table, fingerprint));
    }

    /// Rebuilds from `source` when `fingerprint` differs from the stored
    /// one. Returns whether a rebuild happened.
    ///
    /// A bitmap the source cannot provide resolves to the empty table, so
    /// a broken asset rejects everywhere instead of accepting anywhere.
    pub fn refresh<S: BitmapSource + ?Sized>(&mut self, fingerprint: &str, source: &S) -> bool {
        if self.record.fingerprint == fingerprint {
            return false;
        }
        let table = source
            .alpha_bitmap(fingerprint)
            .unwrap_or_else(AlphaTable::empty);
        self.rebuild(fingerprint, &table);
        true
    }

    /// The decompressed table, inflating it on first access.
    pub fn table(&mut self) -> Result<&AlphaTable, MaskError> {
        match &mut self.table {
            Some(table) => Ok(table),
            slot => Ok(slot.insert(self.record.decode()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct OneAsset {
        id: &'static str,
        table: AlphaTable,
    }

    impl BitmapSource for OneAsset {
        fn alpha_bitmap(&self, id: &str) -> Option<AlphaTable> {
            (id == self.id).then(|| self.table.clone())
        }
    }

    fn checker() -> AlphaTable {
        AlphaTable::new(2, 2, vec![0, 255, 255, 0]).expect("lengths match")
    }

    #[test]
    fn decompresses_lazily_and_survives_invalidation() {
        let mut cache = MaskCache::new(MaskRecord::encode(&checker(), "fp"));
        assert_eq!(cache.table().expect("valid record"), &checker());
        cache.invalidate();
        assert_eq!(cache.table().expect("valid record"), &checker());
    }

    #[test]
    fn refresh_is_keyed_by_fingerprint() {
        let source = OneAsset {
            id: "fp",
            table: checker(),
        };
        let mut cache = MaskCache::empty();
        assert!(cache.refresh("fp", &source));
        assert_eq!(cache.fingerprint(), "fp");
        assert_eq!(cache.table().expect("valid record"), &checker());
        // The persistable record reflects the rebuild.
        assert_eq!((cache.record().width, cache.record().height), (2, 2));
        // Same fingerprint: nothing to do.
        assert!(!cache.refresh("fp", &source));
    }

    #[test]
    fn missing_source_fails_closed() {
        let source = OneAsset {
            id: "present",
            table: checker(),
        };
        let mut cache = MaskCache::new(MaskRecord::encode(&checker(), "old"));
        assert!(cache.refresh("gone", &source));
        // The stale pixels are replaced by the empty, reject-everything table.
        assert!(cache.table().expect("empty is valid").is_empty());
        assert_eq!(cache.fingerprint(), "gone");
    }

    #[test]
    fn corrupt_record_errors_on_access() {
        let mut cache = MaskCache::new(MaskRecord {
            fingerprint: String::new(),
            width: 2,
            height: 2,
            data: vec![0xAA, 0xBB],
        });
        assert!(cache.table().is_err());
        // The error is not cached; a later repair is picked up.
        cache.rebuild("fixed", &checker());
        assert_eq!(cache.table().expect("valid record"), &checker());
    }
}
