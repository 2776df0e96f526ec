//! The viewport observation capability.

use crate::visibility::geometry::{intersection_ratio, Rect};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Intersection ratios for one region, in the order the host measured them.
pub type RatioStream = BoxStream<'static, f64>;

/// Identifies a page region, e.g. the section's `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionRef(String);

impl RegionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that can report how much of a region is on screen.
///
/// Each call to `observe` starts an independent observation; dropping the
/// returned stream ends it.
pub trait ViewportObserver: Send + Sync {
    fn observe(&self, region: &RegionRef) -> RatioStream;
}

type Subscribers = HashMap<RegionRef, Vec<mpsc::UnboundedSender<f64>>>;

/// A [`ViewportObserver`] fed by the host.
///
/// The host measures its layout and calls [`report`](Self::report) or
/// [`report_geometry`](Self::report_geometry); every live observation of
/// that region receives the ratio. Observations whose stream was dropped
/// are pruned on the next report.
#[derive(Clone, Default)]
pub struct ChannelViewport {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl ChannelViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `ratio` to every live observation of `region`.
    ///
    /// Returns how many observations received it.
    pub fn report(&self, region: &RegionRef, ratio: f64) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(senders) = subscribers.get_mut(region) else {
            return 0;
        };
        senders.retain(|tx| tx.send(ratio).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            subscribers.remove(region);
        }
        delivered
    }

    /// Compute the ratio from layout rectangles and deliver it.
    pub fn report_geometry(&self, region: &RegionRef, bounds: &Rect, viewport: &Rect) -> usize {
        self.report(region, intersection_ratio(bounds, viewport))
    }

    /// Number of observations registered for `region`, live or not yet pruned.
    pub fn observation_count(&self, region: &RegionRef) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(region)
            .map_or(0, Vec::len)
    }
}

impl ViewportObserver for ChannelViewport {
    fn observe(&self, region: &RegionRef) -> RatioStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(region.clone())
            .or_default()
            .push(tx);

        stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|ratio| (ratio, rx))
        })
        .boxed()
    }
}
