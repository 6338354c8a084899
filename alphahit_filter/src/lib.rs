// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pixel alpha hit-test decision pipeline.
//!
//! A raycast filter answers one question per query: *should this screen
//! point count as hitting this element?* The filters here answer it from
//! the element's pixels instead of its rectangle — a click on a transparent
//! corner of a sprite, the gap between two glyphs, or the hidden part of a
//! radial fill falls through to whatever is behind.
//!
//! Every filter runs the same pipeline:
//!
//! 1. A configured threshold of zero accepts immediately, before any
//!    mapping or sampling.
//! 2. The screen point maps into element-local space
//!    ([`alphahit_raycast::screen_to_local`]); a failed mapping rejects,
//!    emitting an advisory when the synthetic ray depth is misconfigured.
//! 3. A per-visual resolver turns the local point into a [`Coverage`]:
//!    guaranteed-reject, guaranteed-accept, or a sampled alpha.
//! 4. [`decide`] compares the sampled alpha against the threshold.
//!
//! Ambiguity always fails closed: a missing or unreadable texture, an
//! empty or undecodable mask, or an out-of-range table lookup rejects and
//! reports a [`Warning`] — a broken alpha source must never let input
//! through transparent pixels.
//!
//! Four filters cover the visual kinds:
//!
//! - [`ImageHitFilter`]: texture-backed visuals in any render mode
//!   (simple stretch covers raw bitmaps, plus 9-slice, tiled, and filled).
//! - [`MaskHitFilter`]: a persisted, compressed alpha table sampled
//!   without touching the live texture.
//! - [`TextHitFilter`]: rasterized text via glyph quads over a font atlas.
//! - [`ShapeHitFilter`]: sprite physics-shape polygon containment.
//!
//! Collaborators (texture sampler, diagnostics sink, host camera) are
//! passed per query; filters own only the element's configuration.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use kurbo::Point;

use alphahit_raycast::{
    DEFAULT_RAY_DEPTH, Projection, RectElement, ray_depth_conflict, screen_to_local,
};

mod image;
mod mask;
mod shape;
mod text;

pub use image::ImageHitFilter;
pub use mask::MaskHitFilter;
pub use shape::ShapeHitFilter;
pub use text::TextHitFilter;

/// Texture sampler collaborator.
///
/// Supplies alpha bytes at integer pixel coordinates. Out-of-bounds
/// behavior is the implementor's contract; resolvers may produce
/// coordinates outside the texture.
pub trait AlphaSource {
    /// Texture extent in pixels.
    fn size(&self) -> (u32, u32);

    /// Whether pixel data can be read at all. An unreadable texture makes
    /// every sampled query a guaranteed reject.
    fn is_readable(&self) -> bool {
        true
    }

    /// Alpha byte at `(x, y)`; row 0 is the bottom row.
    fn alpha_at(&self, x: i32, y: i32) -> u8;
}

/// Advisory conditions surfaced during a query.
///
/// Purely observational: a warning never changes an outcome beyond what
/// the fail-closed rules already decided.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Warning {
    /// The synthetic ray depth starts beyond the element's nearest corner.
    RayDepthBeyondElement {
        /// The configured depth.
        ray_depth: f64,
        /// Depth of the element's nearest world-space corner.
        min_corner_depth: f64,
    },
    /// No texture was supplied for a sampled query.
    TextureUnavailable,
    /// The supplied texture cannot be read back.
    TextureUnreadable,
    /// The persisted alpha mask failed to decode.
    MaskDecodeFailed,
    /// An alpha table lookup fell outside the table.
    MaskIndexOutOfRange {
        /// The flat index that was requested.
        index: i64,
        /// The table length.
        len: usize,
    },
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RayDepthBeyondElement {
                ray_depth,
                min_corner_depth,
            } => write!(
                f,
                "ray depth {ray_depth} starts beyond the element's nearest corner at {min_corner_depth}"
            ),
            Self::TextureUnavailable => write!(f, "no texture available for alpha sampling"),
            Self::TextureUnreadable => write!(f, "texture is not readable; cannot sample alpha"),
            Self::MaskDecodeFailed => write!(f, "persisted alpha mask failed to decode"),
            Self::MaskIndexOutOfRange { index, len } => {
                write!(f, "alpha mask lookup out of range: index {index}, length {len}")
            }
        }
    }
}

/// Diagnostics sink collaborator.
///
/// Hosts bridge this to their own logging; the unit impl discards
/// everything.
pub trait DiagnosticsSink {
    /// Reports an advisory condition.
    fn warning(&mut self, warning: Warning);
}

impl DiagnosticsSink for () {
    fn warning(&mut self, _warning: Warning) {}
}

/// Per-element query settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSettings {
    /// Minimum normalized alpha for a sampled hit, in `[0, 1]`.
    ///
    /// Zero (the default) accepts every point of the rectangle without
    /// sampling.
    pub threshold: f64,
    /// Depth of the synthetic picking ray used without a projection.
    pub ray_depth: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            ray_depth: DEFAULT_RAY_DEPTH,
        }
    }
}

impl FilterSettings {
    /// Settings with a non-zero sampling threshold.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Resolver outcome fed into [`decide`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coverage {
    /// No threshold admits the point.
    Reject,
    /// The point is in; no sampling was needed.
    Accept,
    /// A sampled, normalized alpha in `[0, 1]`.
    Sampled(f64),
}

/// Compares a resolver outcome against the configured threshold.
///
/// [`Coverage::Reject`] loses for every threshold, including zero — the
/// zero-threshold acceptance is short-circuited before resolvers run, so a
/// reject that reaches this point stays rejected.
#[must_use]
pub fn decide(coverage: Coverage, threshold: f64) -> bool {
    match coverage {
        Coverage::Reject => false,
        Coverage::Accept => true,
        Coverage::Sampled(alpha) => alpha >= threshold,
    }
}

/// Outcome of the shared pre-pass: either an early decision or a local
/// point for the per-visual resolver.
pub(crate) enum Mapped {
    Done(bool),
    Local(Point),
}

/// Threshold short-circuit and screen-to-local mapping shared by every
/// filter.
pub(crate) fn map_screen_point(
    element: &RectElement,
    settings: &FilterSettings,
    screen: Point,
    projection: Option<&dyn Projection>,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Mapped {
    if settings.threshold <= 0.0 {
        return Mapped::Done(true);
    }
    match screen_to_local(element, screen, projection, settings.ray_depth) {
        Some(local) => Mapped::Local(local),
        None => {
            if let Some(min_corner_depth) = ray_depth_conflict(element, settings.ray_depth) {
                diagnostics.warning(Warning::RayDepthBeyondElement {
                    ray_depth: settings.ray_depth,
                    min_corner_depth,
                });
            }
            Mapped::Done(false)
        }
    }
}

/// Unwraps a usable texture, failing closed on missing or unreadable ones.
pub(crate) fn readable_source<'a>(
    source: Option<&'a dyn AlphaSource>,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Option<&'a dyn AlphaSource> {
    let Some(source) = source else {
        diagnostics.warning(Warning::TextureUnavailable);
        return None;
    };
    if !source.is_readable() {
        diagnostics.warning(Warning::TextureUnreadable);
        return None;
    }
    Some(source)
}

/// Samples a texture and scales by the element's tint alpha.
pub(crate) fn sampled(source: &dyn AlphaSource, x: i32, y: i32, tint_alpha: f64) -> Coverage {
    Coverage::Sampled(tint_alpha * f64::from(source.alpha_at(x, y)) / 255.0)
}
