//! Season inference from month and temperature.

use common::Season;

/// Infer the bass season.
///
/// Water temperature wins over air temperature when present. Thresholds are
/// checked in order and the first match wins, so the spawn band swallows
/// 65–68°F and post-spawn only covers [68, 75).
///
/// With no temperature at all every comparison is false and the result is
/// `Fall`.
pub fn infer_season(month: u32, air_temp_f: Option<f64>, water_temp_f: Option<f64>) -> Season {
    let t = water_temp_f.or(air_temp_f).unwrap_or(f64::NAN);

    if t < 48.0 {
        return Season::Winter;
    }
    if (48.0..55.0).contains(&t) {
        return Season::PreSpawn;
    }
    if (55.0..68.0).contains(&t) {
        return Season::Spawn;
    }
    if (65.0..75.0).contains(&t) {
        return Season::PostSpawn;
    }
    if t >= 75.0 && (6..=8).contains(&month) {
        return Season::Summer;
    }
    Season::Fall
}
