//! Count-up counters for the About section's statistics.

pub mod clock;
pub mod count_up;

pub use clock::{Clock, ManualClock, TokioClock};
pub use count_up::{
    count_up_value, spawn_count_up, CountUpAnimator, CountUpHandle, COUNT_UP_DURATION,
    FRAME_INTERVAL,
};

/// One statistic tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatItem {
    pub value: u64,
    pub label: &'static str,
    pub suffix: &'static str,
}

/// Figures shown in the About section, in display order.
pub const ABOUT_STATS: [StatItem; 4] = [
    StatItem {
        value: 5,
        label: "5.6 Acres Land",
        suffix: "+",
    },
    StatItem {
        value: 290,
        label: "Luxury Apartments",
        suffix: "",
    },
    StatItem {
        value: 34,
        label: "Floors",
        suffix: "",
    },
    StatItem {
        value: 5,
        label: "Star Club House",
        suffix: "★",
    },
];
