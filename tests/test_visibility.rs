//! Visibility latch driven through viewport observers.

use elaira_inquiry::visibility::{
    ChannelViewport, RatioStream, Rect, RegionRef, ViewportObserver, ABOUT_THRESHOLD,
    SECTION_THRESHOLD,
};
use elaira_inquiry::{VisibilityConfig, VisibilityDetector, VisibilityError};
use futures::stream::{self, StreamExt};
use std::time::Duration;

fn detector(threshold: f64) -> VisibilityDetector {
    VisibilityDetector::new(VisibilityConfig::new(threshold).unwrap())
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn wait_until_visible(detector: &VisibilityDetector) {
    let mut seen = detector.subscribe();
    tokio::time::timeout(Duration::from_secs(1), seen.wait_for(|v| *v))
        .await
        .expect("region never became visible")
        .unwrap();
}

/// Replays a fixed list of ratios for every region.
struct ScriptedViewport(Vec<f64>);

impl ViewportObserver for ScriptedViewport {
    fn observe(&self, _region: &RegionRef) -> RatioStream {
        stream::iter(self.0.clone()).boxed()
    }
}

#[tokio::test]
async fn test_below_threshold_stays_hidden() {
    let viewport = ChannelViewport::new();
    let about = RegionRef::new("about");
    let mut detector = detector(ABOUT_THRESHOLD);
    detector.mount(Some(about.clone()), &viewport).unwrap();

    viewport.report(&about, 0.1);
    viewport.report(&about, 0.19);
    settle().await;

    assert!(!detector.is_visible());
}

#[tokio::test]
async fn test_latch_stays_true_after_scrolling_away() {
    let viewport = ChannelViewport::new();
    let about = RegionRef::new("about");
    let mut detector = detector(ABOUT_THRESHOLD);
    detector.mount(Some(about.clone()), &viewport).unwrap();

    viewport.report(&about, 0.25);
    wait_until_visible(&detector).await;

    viewport.report(&about, 0.0);
    settle().await;
    assert!(detector.is_visible());

    // Observation ends once latched.
    assert_eq!(viewport.report(&about, 0.0), 0);
}

#[tokio::test]
async fn test_unmounted_region_defers_until_mounted() {
    let viewport = ChannelViewport::new();
    let gallery = RegionRef::new("gallery");
    let mut detector = detector(SECTION_THRESHOLD);

    detector.mount(None, &viewport).unwrap();
    assert_eq!(detector.region(), None);
    assert_eq!(viewport.report(&gallery, 1.0), 0);
    assert!(!detector.is_visible());

    detector.mount(Some(gallery.clone()), &viewport).unwrap();
    assert!(detector.is_mounted());
    viewport.report(&gallery, 0.5);
    wait_until_visible(&detector).await;
}

#[tokio::test]
async fn test_unmount_ignores_late_ratios() {
    let viewport = ChannelViewport::new();
    let contact = RegionRef::new("contact");
    let mut detector = detector(SECTION_THRESHOLD);
    let seen = detector.subscribe();
    detector.mount(Some(contact.clone()), &viewport).unwrap();

    detector.unmount();
    settle().await;

    assert_eq!(viewport.report(&contact, 1.0), 0);
    settle().await;
    assert!(!*seen.borrow());
    assert!(!detector.is_mounted());
    assert_eq!(
        detector.mount(Some(contact), &viewport),
        Err(VisibilityError::Detached)
    );
}

#[tokio::test]
async fn test_dropping_detector_stops_observation() {
    let viewport = ChannelViewport::new();
    let location = RegionRef::new("location");
    let mut detector = detector(SECTION_THRESHOLD);
    detector.mount(Some(location.clone()), &viewport).unwrap();
    assert_eq!(viewport.observation_count(&location), 1);

    drop(detector);
    settle().await;

    assert_eq!(viewport.report(&location, 1.0), 0);
    assert_eq!(viewport.observation_count(&location), 0);
}

#[tokio::test]
async fn test_regions_latch_independently() {
    let viewport = ChannelViewport::new();
    let about = RegionRef::new("about");
    let gallery = RegionRef::new("gallery");
    let mut about_detector = detector(ABOUT_THRESHOLD);
    let mut gallery_detector = detector(SECTION_THRESHOLD);
    about_detector.mount(Some(about.clone()), &viewport).unwrap();
    gallery_detector
        .mount(Some(gallery.clone()), &viewport)
        .unwrap();

    viewport.report(&gallery, 0.15);
    wait_until_visible(&gallery_detector).await;
    settle().await;

    assert!(!about_detector.is_visible());
}

#[tokio::test]
async fn test_geometry_reports_drive_the_latch() {
    let viewport = ChannelViewport::new();
    let about = RegionRef::new("about");
    let mut detector = detector(ABOUT_THRESHOLD);
    detector.mount(Some(about.clone()), &viewport).unwrap();

    let screen = Rect::new(0.0, 0.0, 1280.0, 800.0);
    // Section starts 40px above the bottom edge: 5% visible.
    viewport.report_geometry(&about, &Rect::new(0.0, 760.0, 1280.0, 800.0), &screen);
    settle().await;
    assert!(!detector.is_visible());

    // Scrolled so that a quarter is on screen.
    viewport.report_geometry(&about, &Rect::new(0.0, 600.0, 1280.0, 800.0), &screen);
    wait_until_visible(&detector).await;
}

#[tokio::test]
async fn test_scripted_observer() {
    let mut detector = detector(0.5);
    detector
        .mount(
            Some(RegionRef::new("hero")),
            &ScriptedViewport(vec![0.1, 0.3, 0.6, 0.2]),
        )
        .unwrap();

    wait_until_visible(&detector).await;
}

#[tokio::test]
async fn test_scripted_observer_never_reaching_threshold() {
    let mut detector = detector(0.5);
    detector
        .mount(
            Some(RegionRef::new("hero")),
            &ScriptedViewport(vec![0.1, 0.3, 0.49]),
        )
        .unwrap();

    settle().await;
    assert!(!detector.is_visible());
}

#[test]
fn test_mount_outside_runtime_fails() {
    let viewport = ChannelViewport::new();
    let mut detector = detector(SECTION_THRESHOLD);

    assert_eq!(
        detector.mount(Some(RegionRef::new("contact")), &viewport),
        Err(VisibilityError::NoRuntime)
    );
    // Deferred mounts need no runtime.
    assert!(detector.mount(None, &viewport).is_ok());
}
