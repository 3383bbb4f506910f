//! Coarse buckets for raw weather readings.

use common::{Cloud, TimeOfDay, Wind};

/// Cloud cover percentage → sky bucket.
pub fn classify_cloud(percent: f64) -> Cloud {
    if percent <= 20.0 {
        Cloud::Clear
    } else if percent <= 60.0 {
        Cloud::Partly
    } else {
        Cloud::Overcast
    }
}

/// Wind speed in mph → wind bucket.
pub fn classify_wind(mph: f64) -> Wind {
    if mph < 5.0 {
        Wind::Calm
    } else if mph <= 12.0 {
        Wind::Breezy
    } else {
        Wind::Windy
    }
}

/// Local hour (0–23) → light bucket.
pub fn time_of_day(hour: u32) -> TimeOfDay {
    if hour <= 8 || hour >= 19 {
        TimeOfDay::LowLight
    } else if hour <= 16 {
        TimeOfDay::Midday
    } else {
        TimeOfDay::Evening
    }
}
