//! Static lure table: base picks per (species, season).

use common::{Pick, Season, Species};

/// A borrowed table row. Converted to an owned [`Pick`] when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasePick {
    pub lure: &'static str,
    pub color: &'static str,
    pub weight: &'static str,
    pub technique: &'static str,
}

impl BasePick {
    const fn new(
        lure: &'static str,
        color: &'static str,
        weight: &'static str,
        technique: &'static str,
    ) -> Self {
        Self {
            lure,
            color,
            weight,
            technique,
        }
    }

    pub fn to_pick(&self) -> Pick {
        Pick::new(self.lure, self.color, self.weight, self.technique)
    }
}

// ── Smallmouth ────────────────────────────────────────────────────────

#[rustfmt::skip]
const SMALLMOUTH_PRE_SPAWN: &[BasePick] = &[
    BasePick::new("3.5\" tube", "green pumpkin/black flake", "1/8–3/16 oz", "Drag/pop across rocky points."),
    BasePick::new("Suspending jerkbait", "silver/blue", "", "Twitch with 3–5s pauses."),
    BasePick::new("3\" finesse swimbait", "natural shad", "1/8 oz", "Slow roll near bottom on points."),
];
#[rustfmt::skip]
const SMALLMOUTH_SPAWN: &[BasePick] = &[
    BasePick::new("Ned rig", "green pumpkin", "1/10–1/6 oz", "Sight-fish beds or adjacent flats."),
    BasePick::new("Tube", "smoke/black flake", "1/8 oz", "Short hops around beds/rock."),
];
#[rustfmt::skip]
const SMALLMOUTH_SUMMER: &[BasePick] = &[
    BasePick::new("Drop shot", "baitfish colors", "1/4 oz", "Humps/rock piles; keep bait just off bottom."),
    BasePick::new("Spinnerbait (double willow)", "white", "3/8 oz", "Wind on flats; cover water."),
];
#[rustfmt::skip]
const SMALLMOUTH_FALL: &[BasePick] = &[
    BasePick::new("Flat-side crank", "shad", "1/4–3/8 oz", "Parallel rock banks; steady retrieve."),
    BasePick::new("Swimbait 3–3.8\"", "natural", "1/8–3/16 oz", "Chase bait schools on points."),
];
#[rustfmt::skip]
const SMALLMOUTH_POST_SPAWN: &[BasePick] = &[
    BasePick::new("Topwater walking bait", "bone", "", "Low light over flats and points."),
    BasePick::new("Ned rig", "green pumpkin", "1/10–1/6 oz", "Pick off roaming fish."),
];
#[rustfmt::skip]
const SMALLMOUTH_WINTER: &[BasePick] = &[
    BasePick::new("Jerkbait", "ghost minnow", "", "Long 5–10s pauses; suspend over 8–15 ft."),
    BasePick::new("Football jig", "green pumpkin", "3/8 oz", "Drag slowly on rocks."),
];

// ── Largemouth ────────────────────────────────────────────────────────

#[rustfmt::skip]
const LARGEMOUTH_SUMMER: &[BasePick] = &[
    BasePick::new("Texas-rig worm 7–10\"", "green pumpkin/Junebug", "3/16–1/4 oz", "Edges of grass; slow lift and drop."),
    BasePick::new("Chatterbait", "white/chart", "3/8–1/2 oz", "Windy banks or grass flats."),
    BasePick::new("Frog (hollow body)", "black", "", "Over mats in low light."),
];
#[rustfmt::skip]
const LARGEMOUTH_PRE_SPAWN: &[BasePick] = &[
    BasePick::new("Spinnerbait", "white/chart", "3/8 oz", "Windy staging banks."),
    BasePick::new("Jerkbait", "shad", "", "2–4s pauses near points."),
    BasePick::new("Jig", "gp/black-blue", "3/8 oz", "Craw around wood/rock."),
];
#[rustfmt::skip]
const LARGEMOUTH_SPAWN: &[BasePick] = &[
    BasePick::new("Texas-rig creature", "white/gp", "1/8–1/4 oz", "Pitch to beds/cover."),
    BasePick::new("Wacky senko 5\"", "gp", "", "Skip docks; slow sink."),
];
#[rustfmt::skip]
const LARGEMOUTH_POST_SPAWN: &[BasePick] = &[
    BasePick::new("Topwater popper", "bone", "", "Early/late; shade lines."),
    BasePick::new("Swim jig", "white/shad", "1/4 oz", "Bluegill or shad spawn banks."),
];
#[rustfmt::skip]
const LARGEMOUTH_FALL: &[BasePick] = &[
    BasePick::new("Squarebill crank", "shad", "1.5 size", "Bang cover on shallow flats."),
    BasePick::new("Chatterbait", "white/shad", "3/8 oz", "Wind + bait present."),
];
#[rustfmt::skip]
const LARGEMOUTH_WINTER: &[BasePick] = &[
    BasePick::new("Jig", "black/blue", "3/8–1/2 oz", "Slow crawl on steep rock."),
    BasePick::new("Jerkbait", "shad", "", "Longer pauses on sunny points."),
];

// ── Spotted ───────────────────────────────────────────────────────────

#[rustfmt::skip]
const SPOTTED_SUMMER: &[BasePick] = &[
    BasePick::new("Drop shot", "shad", "1/4 oz", "Suspended fish over timber/points."),
    BasePick::new("Underspin", "white", "1/4 oz", "Slow roll over bait balls."),
];
#[rustfmt::skip]
const SPOTTED_PRE_SPAWN: &[BasePick] = &[
    BasePick::new("Jerkbait", "shad", "", "Work over points with bait present."),
    BasePick::new("Finesse swimbait 3–3.8\"", "natural", "1/8–3/16 oz", "Count down to depth and slow roll."),
];
#[rustfmt::skip]
const SPOTTED_SPAWN: &[BasePick] = &[
    BasePick::new("Neko rig", "green pumpkin", "1/16–1/8 oz", "Docks/rock transitions; shake lightly."),
];
#[rustfmt::skip]
const SPOTTED_POST_SPAWN: &[BasePick] = &[
    BasePick::new("Topwater walking bait", "bone", "", "Schoolers on points early/late."),
    BasePick::new("Drop shot", "natural", "3/16–1/4 oz", "Watch electronics; vertical when possible."),
];
#[rustfmt::skip]
const SPOTTED_FALL: &[BasePick] = &[
    BasePick::new("Spinnerbait", "white", "3/8 oz", "Windy pockets chasing bait."),
    BasePick::new("Alabama rig (check regs)", "shad", "1/4 oz heads", "Over suspended bait."),
];
#[rustfmt::skip]
const SPOTTED_WINTER: &[BasePick] = &[
    BasePick::new("Jerkbait", "ghost shad", "", "Long pauses near bluff walls."),
    BasePick::new("Finesse jig", "gp", "5/16 oz", "Drag slowly on rock humps."),
];

// ── Conditional picks ─────────────────────────────────────────────────

/// Added for muddy water.
pub const MUDDY_WATER_PICK: BasePick = BasePick::new(
    "Chatterbait",
    "black/blue or chart",
    "3/8–1/2 oz",
    "Slow-rolled around cover.",
);

/// Added whenever the sky is not clear or the wind is not calm.
pub const WIND_OVERCAST_PICK: BasePick = BasePick::new(
    "Spinnerbait (double willow)",
    "white/chart",
    "3/8 oz",
    "Great with wind/overcast; cover water.",
);

/// Base picks for a species in a given season, in table order.
pub fn base_picks(species: Species, season: Season) -> &'static [BasePick] {
    match (species, season) {
        (Species::Smallmouth, Season::PreSpawn) => SMALLMOUTH_PRE_SPAWN,
        (Species::Smallmouth, Season::Spawn) => SMALLMOUTH_SPAWN,
        (Species::Smallmouth, Season::Summer) => SMALLMOUTH_SUMMER,
        (Species::Smallmouth, Season::Fall) => SMALLMOUTH_FALL,
        (Species::Smallmouth, Season::PostSpawn) => SMALLMOUTH_POST_SPAWN,
        (Species::Smallmouth, Season::Winter) => SMALLMOUTH_WINTER,

        (Species::Largemouth, Season::Summer) => LARGEMOUTH_SUMMER,
        (Species::Largemouth, Season::PreSpawn) => LARGEMOUTH_PRE_SPAWN,
        (Species::Largemouth, Season::Spawn) => LARGEMOUTH_SPAWN,
        (Species::Largemouth, Season::PostSpawn) => LARGEMOUTH_POST_SPAWN,
        (Species::Largemouth, Season::Fall) => LARGEMOUTH_FALL,
        (Species::Largemouth, Season::Winter) => LARGEMOUTH_WINTER,

        (Species::Spotted, Season::Summer) => SPOTTED_SUMMER,
        (Species::Spotted, Season::PreSpawn) => SPOTTED_PRE_SPAWN,
        (Species::Spotted, Season::Spawn) => SPOTTED_SPAWN,
        (Species::Spotted, Season::PostSpawn) => SPOTTED_POST_SPAWN,
        (Species::Spotted, Season::Fall) => SPOTTED_FALL,
        (Species::Spotted, Season::Winter) => SPOTTED_WINTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_SPECIES: [Species; 3] =
        [Species::Smallmouth, Species::Largemouth, Species::Spotted];
    const ALL_SEASONS: [Season; 6] = [
        Season::Winter,
        Season::PreSpawn,
        Season::Spawn,
        Season::PostSpawn,
        Season::Summer,
        Season::Fall,
    ];

    #[test]
    fn test_every_cell_has_unique_rows() {
        for species in ALL_SPECIES {
            for season in ALL_SEASONS {
                let rows = base_picks(species, season);
                assert!(
                    (1..=3).contains(&rows.len()),
                    "{species}/{season} has {} rows",
                    rows.len()
                );
                let unique: HashSet<_> = rows.iter().map(|r| r.to_pick()).collect();
                assert_eq!(unique.len(), rows.len(), "{species}/{season} repeats a row");
            }
        }
    }

    #[test]
    fn test_spotted_spawn_is_single_neko_rig() {
        let rows = base_picks(Species::Spotted, Season::Spawn);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lure, "Neko rig");
        assert_eq!(rows[0].weight, "1/16–1/8 oz");
    }

    #[test]
    fn test_smallmouth_pre_spawn_rows_verbatim() {
        let rows = base_picks(Species::Smallmouth, Season::PreSpawn);
        assert_eq!(
            rows[0].to_pick(),
            Pick::new(
                "3.5\" tube",
                "green pumpkin/black flake",
                "1/8–3/16 oz",
                "Drag/pop across rocky points."
            )
        );
        assert_eq!(rows[1].lure, "Suspending jerkbait");
        assert_eq!(rows[1].weight, "");
        assert_eq!(rows[2].lure, "3\" finesse swimbait");
    }

    #[test]
    fn test_largemouth_summer_order() {
        let lures: Vec<_> = base_picks(Species::Largemouth, Season::Summer)
            .iter()
            .map(|r| r.lure)
            .collect();
        assert_eq!(
            lures,
            vec!["Texas-rig worm 7–10\"", "Chatterbait", "Frog (hollow body)"]
        );
    }
}
