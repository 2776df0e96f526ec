//! Scroll-triggered visibility detection.
//!
//! A [`VisibilityDetector`] watches one page region through an injectable
//! [`ViewportObserver`] and latches to `true` the first time enough of the
//! region is on screen. Sections use the latch to start their entrance
//! animations and counters.

pub mod detector;
pub mod geometry;
pub mod observer;

pub use detector::{VisibilityConfig, VisibilityDetector};
pub use geometry::{intersection_ratio, Rect};
pub use observer::{ChannelViewport, RatioStream, RegionRef, ViewportObserver};

/// Threshold used by the About section (the one with counters).
pub const ABOUT_THRESHOLD: f64 = 0.2;

/// Threshold used by the Contact, Gallery and Location sections.
pub const SECTION_THRESHOLD: f64 = 0.1;
