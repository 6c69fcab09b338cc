//! Well-known data keys for the dashboard state slices a host persists.
//!
//! Each key names one slice of dashboard state and maps to its own file
//! (`dashboard_<key>.json`). Using these constants keeps hosts, the CLI,
//! and tests on one spelling; arbitrary keys remain valid.

/// Catch-all key used when a run does not name one.
pub const DASHBOARD_STATE: &str = "dashboard_state";

pub const CUSTOM_CARDS: &str = "customCards";
pub const HIDDEN_CARDS: &str = "hiddenCards";
pub const HIDDEN_POINTS: &str = "hiddenPoints";
pub const CARD_TITLES: &str = "cardTitles";
pub const CARD_SIZES: &str = "cardSizes";
pub const EXPANDED_SECTIONS: &str = "expandedSections";
pub const EXPANDED_DEVICES: &str = "expandedDevices";
pub const POINT_ASSIGNMENTS: &str = "pointAssignments";
pub const CARD_ORDER: &str = "cardOrder";
pub const CARD_CUSTOMIZATIONS: &str = "cardCustomizations";

/// Every dashboard slice key, in the order hosts typically enumerate them.
pub const ALL: [&str; 10] = [
    CUSTOM_CARDS,
    HIDDEN_CARDS,
    HIDDEN_POINTS,
    CARD_TITLES,
    CARD_SIZES,
    EXPANDED_SECTIONS,
    EXPANDED_DEVICES,
    POINT_ASSIGNMENTS,
    CARD_ORDER,
    CARD_CUSTOMIZATIONS,
];
