// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha hit testing for texture-backed image visuals.

use kurbo::Point;

use alphahit_raycast::{Projection, RectElement};
use alphahit_region::{
    RenderMode, Resolved, SpriteRegion, resolve_filled, resolve_simple, resolve_sliced,
    resolve_tiled,
};

use crate::{
    AlphaSource, Coverage, DiagnosticsSink, FilterSettings, Mapped, decide, map_screen_point,
    readable_source, sampled,
};

/// Raycast filter for an image element.
///
/// Dispatches on [`RenderMode`]: simple stretch (which also covers raw,
/// sprite-less bitmaps), 9-slice, tiled, and filled. Visible points sample
/// the element's texture and compare against the threshold; points hidden
/// by the render mode reject outright.
#[derive(Clone, Debug)]
pub struct ImageHitFilter {
    /// Element placement and rectangle.
    pub element: RectElement,
    /// Query settings.
    pub settings: FilterSettings,
    /// Sprite metadata (atlas rectangle, borders).
    pub sprite: SpriteRegion,
    /// Active render mode.
    pub mode: RenderMode,
    /// The element tint's alpha; scales every sampled value.
    pub tint_alpha: f64,
}

impl ImageHitFilter {
    /// A simple-mode filter with default settings and an opaque tint.
    #[must_use]
    pub fn new(element: RectElement, sprite: SpriteRegion) -> Self {
        Self {
            element,
            settings: FilterSettings::default(),
            sprite,
            mode: RenderMode::Simple,
            tint_alpha: 1.0,
        }
    }

    /// Whether `screen` counts as hitting this element.
    pub fn hit_test(
        &self,
        screen: Point,
        projection: Option<&dyn Projection>,
        texture: Option<&dyn AlphaSource>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        let local =
            match map_screen_point(&self.element, &self.settings, screen, projection, diagnostics) {
                Mapped::Done(hit) => return hit,
                Mapped::Local(local) => local,
            };
        decide(
            self.coverage(local, texture, diagnostics),
            self.settings.threshold,
        )
    }

    fn coverage(
        &self,
        local: Point,
        texture: Option<&dyn AlphaSource>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> Coverage {
        let Some(texture) = readable_source(texture, diagnostics) else {
            return Coverage::Reject;
        };
        let (tex_width, tex_height) = texture.size();
        let size = self.element.size;
        let pivot = self.element.pivot;
        let resolved = match &self.mode {
            RenderMode::Simple => resolve_simple(local, size, pivot, tex_width, tex_height),
            RenderMode::Sliced { fill_center } => {
                resolve_sliced(local, size, pivot, &self.sprite, *fill_center)
            }
            RenderMode::Tiled { fill_center } => {
                resolve_tiled(local, size, pivot, &self.sprite, *fill_center)
            }
            RenderMode::Filled(fill) => {
                resolve_filled(local, size, pivot, fill, tex_width, tex_height)
            }
        };
        match resolved {
            Resolved::Sample { x, y } => sampled(texture, x, y, self.tint_alpha),
            Resolved::Outside => Coverage::Reject,
        }
    }
}
