// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha hit testing for rasterized text.

use alloc::vec::Vec;

use kurbo::Point;

use alphahit_glyph::{GlyphQuad, resolve_glyph_sample};
use alphahit_raycast::{Projection, RectElement};

use crate::{
    AlphaSource, Coverage, DiagnosticsSink, FilterSettings, Mapped, decide, map_screen_point,
    readable_source, sampled,
};

/// Raycast filter for a text element.
///
/// Walks the glyph quads in render order, finds the one under the point,
/// and samples the font atlas at the glyph's texture coordinate. Points in
/// inter-glyph space reject; multi-material text runs one filter per atlas.
#[derive(Clone, Debug)]
pub struct TextHitFilter {
    /// Element placement and rectangle.
    pub element: RectElement,
    /// Query settings.
    pub settings: FilterSettings,
    /// Rendered glyph quads in element-local space.
    pub quads: Vec<GlyphQuad>,
    /// The text tint's alpha; scales every sampled value.
    pub tint_alpha: f64,
}

impl TextHitFilter {
    /// A filter over `quads` with default settings and an opaque tint.
    #[must_use]
    pub fn new(element: RectElement, quads: Vec<GlyphQuad>) -> Self {
        Self {
            element,
            settings: FilterSettings::default(),
            quads,
            tint_alpha: 1.0,
        }
    }

    /// Whether `screen` counts as hitting this element.
    pub fn hit_test(
        &self,
        screen: Point,
        projection: Option<&dyn Projection>,
        atlas: Option<&dyn AlphaSource>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        let local =
            match map_screen_point(&self.element, &self.settings, screen, projection, diagnostics) {
                Mapped::Done(hit) => return hit,
                Mapped::Local(local) => local,
            };
        decide(
            self.coverage(local, atlas, diagnostics),
            self.settings.threshold,
        )
    }

    fn coverage(
        &self,
        local: Point,
        atlas: Option<&dyn AlphaSource>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> Coverage {
        let Some(atlas) = readable_source(atlas, diagnostics) else {
            return Coverage::Reject;
        };
        let (tex_width, tex_height) = atlas.size();
        match resolve_glyph_sample(&self.quads, local, tex_width, tex_height) {
            Some((x, y)) => sampled(atlas, x, y, self.tint_alpha),
            None => Coverage::Reject,
        }
    }
}
