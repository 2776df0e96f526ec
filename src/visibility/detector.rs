//! One-shot "has this region been seen" latch.

use crate::error::{VisibilityError, VisibilityResult};
use crate::visibility::observer::{RegionRef, ViewportObserver};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How much of a region must be on screen before it counts as seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    threshold: f64,
}

impl VisibilityConfig {
    /// # Errors
    ///
    /// `InvalidThreshold` unless `0.0 <= threshold <= 1.0`.
    pub fn new(threshold: f64) -> VisibilityResult<Self> {
        if (0.0..=1.0).contains(&threshold) {
            Ok(Self { threshold })
        } else {
            Err(VisibilityError::InvalidThreshold(threshold))
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a measured ratio satisfies the threshold.
    ///
    /// A zero threshold still needs some part of the region on screen.
    pub fn is_met_by(&self, ratio: f64) -> bool {
        if ratio.is_nan() || ratio <= 0.0 {
            return false;
        }
        ratio >= self.threshold
    }
}

/// State shared between the detector and its observation task.
struct Shared {
    config: VisibilityConfig,
    alive: AtomicBool,
    seen: watch::Sender<bool>,
}

impl Shared {
    /// Apply one measurement. Returns whether it flipped the latch.
    fn record(&self, ratio: f64) -> bool {
        if !self.alive.load(Ordering::Acquire) || !self.config.is_met_by(ratio) {
            return false;
        }
        self.seen.send_if_modified(|seen| !std::mem::replace(seen, true))
    }

    fn is_seen(&self) -> bool {
        *self.seen.borrow()
    }
}

/// Watches one page region and latches to `true` once it has been seen.
///
/// The latch never goes back to `false`. Dropping the detector (or calling
/// [`unmount`](Self::unmount)) stops observation; ratios that arrive after
/// that are ignored.
pub struct VisibilityDetector {
    shared: Arc<Shared>,
    region: Option<RegionRef>,
    task: Option<JoinHandle<()>>,
}

impl VisibilityDetector {
    pub fn new(config: VisibilityConfig) -> Self {
        let (seen, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                config,
                alive: AtomicBool::new(true),
                seen,
            }),
            region: None,
            task: None,
        }
    }

    pub fn config(&self) -> VisibilityConfig {
        self.shared.config
    }

    pub fn is_visible(&self) -> bool {
        self.shared.is_seen()
    }

    /// Receiver that yields `true` once the region has been seen.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.seen.subscribe()
    }

    /// The region currently observed, if any.
    pub fn region(&self) -> Option<&RegionRef> {
        self.region.as_ref()
    }

    /// Start observing `region` through `observer`.
    ///
    /// `None` means the host has not rendered the region yet: visibility
    /// stays `false` and nothing is observed until `mount` is called again
    /// with a region. Mounting again replaces any earlier observation.
    /// Once the latch is set there is nothing left to observe.
    ///
    /// # Errors
    ///
    /// `Detached` after [`unmount`](Self::unmount); `NoRuntime` when called
    /// outside a tokio runtime.
    pub fn mount(
        &mut self,
        region: Option<RegionRef>,
        observer: &dyn ViewportObserver,
    ) -> VisibilityResult<()> {
        if !self.shared.alive.load(Ordering::Acquire) {
            return Err(VisibilityError::Detached);
        }

        self.stop_task();
        self.region = region;

        let Some(region) = self.region.as_ref() else {
            tracing::debug!("Visibility region not mounted yet; observation deferred");
            return Ok(());
        };

        if self.shared.is_seen() {
            return Ok(());
        }

        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| VisibilityError::NoRuntime)?;

        let mut ratios = observer.observe(region);
        let shared = Arc::clone(&self.shared);
        let name = region.clone();

        self.task = Some(runtime.spawn(async move {
            while let Some(ratio) = ratios.next().await {
                if !shared.alive.load(Ordering::Acquire) {
                    break;
                }
                if shared.record(ratio) {
                    tracing::debug!("Region {} became visible (ratio {:.2})", name, ratio);
                    break;
                }
            }
        }));

        Ok(())
    }

    /// Feed one measurement directly, bypassing the observer.
    ///
    /// Returns whether it flipped the latch. A no-op after unmount.
    pub fn record_ratio(&self, ratio: f64) -> bool {
        self.shared.record(ratio)
    }

    /// Stop observing for good. The current latch value stays readable.
    pub fn unmount(&mut self) {
        self.shared.alive.store(false, Ordering::Release);
        self.stop_task();
        self.region = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.alive.load(Ordering::Acquire) && self.region.is_some()
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for VisibilityDetector {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_range() {
        assert!(VisibilityConfig::new(0.0).is_ok());
        assert!(VisibilityConfig::new(1.0).is_ok());
        assert_eq!(
            VisibilityConfig::new(1.2),
            Err(VisibilityError::InvalidThreshold(1.2))
        );
        assert!(VisibilityConfig::new(-0.1).is_err());
        assert!(VisibilityConfig::new(f64::NAN).is_err());
    }

    #[test]
    fn test_is_met_by() {
        let config = VisibilityConfig::new(0.2).unwrap();
        assert!(!config.is_met_by(0.19));
        assert!(config.is_met_by(0.2));
        assert!(config.is_met_by(1.0));
        assert!(!config.is_met_by(f64::NAN));

        let any = VisibilityConfig::new(0.0).unwrap();
        assert!(!any.is_met_by(0.0));
        assert!(any.is_met_by(0.01));
    }

    #[test]
    fn test_direct_ratios_latch_once() {
        let detector = VisibilityDetector::new(VisibilityConfig::new(0.1).unwrap());
        assert!(!detector.record_ratio(0.05));
        assert!(!detector.is_visible());
        assert!(detector.record_ratio(0.3));
        assert!(!detector.record_ratio(0.9));
        assert!(!detector.record_ratio(0.0));
        assert!(detector.is_visible());
    }

    #[test]
    fn test_late_ratio_after_unmount_is_ignored() {
        let mut detector = VisibilityDetector::new(VisibilityConfig::new(0.1).unwrap());
        detector.unmount();
        assert!(!detector.record_ratio(1.0));
        assert!(!detector.is_visible());
    }
}
