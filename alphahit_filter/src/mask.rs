// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha hit testing against a persisted, pre-baked alpha table.

use kurbo::Point;

use alphahit_mask::MaskCache;
use alphahit_raycast::{Projection, RectElement};

use crate::{
    Coverage, DiagnosticsSink, FilterSettings, Mapped, Warning, decide, map_screen_point,
};

/// Raycast filter backed by a baked alpha table instead of a live texture.
///
/// The table is persisted compressed and inflated lazily on first use,
/// which is why queries take `&mut self`; hosts sharing a filter across
/// threads must serialize access. The table is authoritative: no tint
/// scaling is applied.
///
/// An empty table — including the fail-closed result of rebuilding from a
/// missing source — rejects everywhere.
#[derive(Clone, Debug)]
pub struct MaskHitFilter {
    /// Element placement and rectangle.
    pub element: RectElement,
    /// Query settings.
    pub settings: FilterSettings,
    /// The baked alpha table and its persisted record.
    pub mask: MaskCache,
}

impl MaskHitFilter {
    /// A filter over `mask` with default settings.
    #[must_use]
    pub fn new(element: RectElement, mask: MaskCache) -> Self {
        Self {
            element,
            settings: FilterSettings::default(),
            mask,
        }
    }

    /// Whether `screen` counts as hitting this element.
    pub fn hit_test(
        &mut self,
        screen: Point,
        projection: Option<&dyn Projection>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        let local =
            match map_screen_point(&self.element, &self.settings, screen, projection, diagnostics) {
                Mapped::Done(hit) => return hit,
                Mapped::Local(local) => local,
            };
        decide(self.coverage(local, diagnostics), self.settings.threshold)
    }

    fn coverage(&mut self, local: Point, diagnostics: &mut dyn DiagnosticsSink) -> Coverage {
        let coord = self.element.normalized(local);
        let table = match self.mask.table() {
            Ok(table) => table,
            Err(_) => {
                diagnostics.warning(Warning::MaskDecodeFailed);
                return Coverage::Reject;
            }
        };
        if table.is_empty() {
            return Coverage::Reject;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "sample coordinates are truncated toward zero by design"
        )]
        let (x, y) = (
            (coord.x * f64::from(table.width() - 1)) as i64,
            (coord.y * f64::from(table.height() - 1)) as i64,
        );
        let index = x + y * i64::from(table.width());
        let byte = if x < 0 || y < 0 {
            None
        } else {
            usize::try_from(index)
                .ok()
                .and_then(|index| table.data().get(index))
                .copied()
        };
        match byte {
            Some(byte) => Coverage::Sampled(f64::from(byte) / 255.0),
            None => {
                diagnostics.warning(Warning::MaskIndexOutOfRange {
                    index,
                    len: table.len(),
                });
                Coverage::Reject
            }
        }
    }
}
