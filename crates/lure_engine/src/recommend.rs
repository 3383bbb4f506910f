//! Deterministic rule-based recommender.

use std::collections::HashSet;

use common::{Clarity, Cloud, Pick, Recommendation, Season, Species, Wind};
use tracing::debug;

use crate::table::{base_picks, MUDDY_WATER_PICK, WIND_OVERCAST_PICK};

/// Upper bound on emitted picks.
pub const MAX_PICKS: usize = 4;

const COLD_WATER_F: f64 = 45.0;

const NOTE_CLEAR: &str = "Clear water → natural colors, lighter line, longer casts.";
const NOTE_MUDDY: &str = "Muddy water → darker/brighter colors, bulkier profiles, vibration.";
const NOTE_COLD: &str =
    "Cold water → slow down; extend jerkbait pauses; drag bottom presentations.";

/// Everything the rule table looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleInput {
    pub species: Species,
    pub season: Season,
    pub clarity: Option<Clarity>,
    pub cloud: Cloud,
    pub wind: Wind,
    pub water_temp_f: Option<f64>,
}

/// Build the rule-based recommendation.
///
/// Base picks come from the lure table, conditional picks are appended
/// after them, then the list is de-duplicated (first occurrence wins) and
/// capped at [`MAX_PICKS`]. Notes are independent of the cap.
pub fn recommend(input: &RuleInput) -> Recommendation {
    let mut candidates: Vec<Pick> = base_picks(input.species, input.season)
        .iter()
        .map(|row| row.to_pick())
        .collect();
    let mut notes: Vec<String> = Vec::new();

    if input.clarity == Some(Clarity::Clear) {
        notes.push(NOTE_CLEAR.to_string());
    }
    if input.clarity == Some(Clarity::Muddy) {
        notes.push(NOTE_MUDDY.to_string());
        candidates.push(MUDDY_WATER_PICK.to_pick());
    }
    if input.cloud != Cloud::Clear || input.wind != Wind::Calm {
        candidates.push(WIND_OVERCAST_PICK.to_pick());
    }
    if matches!(input.water_temp_f, Some(t) if t < COLD_WATER_F) {
        notes.push(NOTE_COLD.to_string());
    }

    let picks = dedupe_capped(candidates, MAX_PICKS);

    debug!(
        "Rule picks for {}/{}: {} picks, {} notes",
        input.species,
        input.season,
        picks.len(),
        notes.len()
    );

    Recommendation { picks, notes }
}

fn dedupe_capped(candidates: Vec<Pick>, cap: usize) -> Vec<Pick> {
    let mut seen: HashSet<Pick> = HashSet::new();
    let mut unique: Vec<Pick> = Vec::with_capacity(cap);

    for pick in candidates {
        if unique.len() >= cap {
            break;
        }
        if seen.insert(pick.clone()) {
            unique.push(pick);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SPECIES: [Species; 3] = [Species::Smallmouth, Species::Largemouth, Species::Spotted];
    const ALL_SEASONS: [Season; 6] = [
        Season::Winter,
        Season::PreSpawn,
        Season::Spawn,
        Season::PostSpawn,
        Season::Summer,
        Season::Fall,
    ];
    const ALL_CLARITY: [Option<Clarity>; 4] = [
        None,
        Some(Clarity::Clear),
        Some(Clarity::Stained),
        Some(Clarity::Muddy),
    ];
    const ALL_CLOUD: [Cloud; 3] = [Cloud::Clear, Cloud::Partly, Cloud::Overcast];
    const ALL_WIND: [Wind; 3] = [Wind::Calm, Wind::Breezy, Wind::Windy];

    fn input(species: Species, season: Season) -> RuleInput {
        RuleInput {
            species,
            season,
            clarity: None,
            cloud: Cloud::Clear,
            wind: Wind::Calm,
            water_temp_f: Some(60.0),
        }
    }

    fn for_every_input(mut check: impl FnMut(&RuleInput)) {
        for species in ALL_SPECIES {
            for season in ALL_SEASONS {
                for clarity in ALL_CLARITY {
                    for cloud in ALL_CLOUD {
                        for wind in ALL_WIND {
                            for water_temp_f in [None, Some(40.0), Some(70.0)] {
                                check(&RuleInput {
                                    species,
                                    season,
                                    clarity,
                                    cloud,
                                    wind,
                                    water_temp_f,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_pick_count_bounds_and_uniqueness() {
        for_every_input(|inp| {
            let rec = recommend(inp);
            assert!(rec.picks.len() <= MAX_PICKS, "{inp:?} gave {} picks", rec.picks.len());
            let unique: HashSet<_> = rec.picks.iter().collect();
            assert_eq!(unique.len(), rec.picks.len(), "{inp:?} produced duplicates");

            // Spotted/spawn has a single table row, so it can only reach two
            // picks through a conditional addition.
            let single_row = inp.species == Species::Spotted && inp.season == Season::Spawn;
            let calm_clear_plain = inp.cloud == Cloud::Clear
                && inp.wind == Wind::Calm
                && inp.clarity != Some(Clarity::Muddy);
            if single_row && calm_clear_plain {
                assert_eq!(rec.picks.len(), 1);
            } else {
                assert!(rec.picks.len() >= 2, "{inp:?} gave {} picks", rec.picks.len());
            }
        });
    }

    #[test]
    fn test_idempotent() {
        for_every_input(|inp| {
            assert_eq!(recommend(inp), recommend(inp));
        });
    }

    #[test]
    fn test_base_only_when_calm_and_clear() {
        let rec = recommend(&input(Species::Largemouth, Season::Winter));
        let lures: Vec<_> = rec.picks.iter().map(|p| p.lure.as_str()).collect();
        assert_eq!(lures, vec!["Jig", "Jerkbait"]);
        assert!(rec.notes.is_empty());
    }

    #[test]
    fn test_muddy_adds_chatterbait_and_note() {
        let mut inp = input(Species::Smallmouth, Season::Spawn);
        inp.clarity = Some(Clarity::Muddy);
        let rec = recommend(&inp);

        let chatterbaits: Vec<_> = rec
            .picks
            .iter()
            .filter(|p| **p == MUDDY_WATER_PICK.to_pick())
            .collect();
        assert_eq!(chatterbaits.len(), 1);
        assert_eq!(rec.picks.len(), 3);
        assert_eq!(rec.notes, vec![NOTE_MUDDY.to_string()]);
    }

    #[test]
    fn test_cap_drops_trailing_wind_pick() {
        // Three table rows + muddy + wind → five candidates, capped to four.
        let mut inp = input(Species::Largemouth, Season::PreSpawn);
        inp.clarity = Some(Clarity::Muddy);
        inp.wind = Wind::Windy;
        let rec = recommend(&inp);

        assert_eq!(rec.picks.len(), MAX_PICKS);
        assert_eq!(rec.picks[3], MUDDY_WATER_PICK.to_pick());
        assert!(!rec.picks.contains(&WIND_OVERCAST_PICK.to_pick()));
        assert_eq!(rec.notes, vec![NOTE_MUDDY.to_string()]);
    }

    #[test]
    fn test_wind_or_overcast_adds_spinnerbait() {
        let mut inp = input(Species::Spotted, Season::Winter);
        inp.cloud = Cloud::Overcast;
        let rec = recommend(&inp);
        assert_eq!(rec.picks.last(), Some(&WIND_OVERCAST_PICK.to_pick()));

        let mut inp = input(Species::Spotted, Season::Winter);
        inp.wind = Wind::Breezy;
        let rec = recommend(&inp);
        assert_eq!(rec.picks.last(), Some(&WIND_OVERCAST_PICK.to_pick()));
    }

    #[test]
    fn test_same_lure_different_color_is_not_a_duplicate() {
        // Smallmouth summer already has a white double-willow spinnerbait;
        // the wind pick is white/chart so both survive.
        let mut inp = input(Species::Smallmouth, Season::Summer);
        inp.wind = Wind::Windy;
        let rec = recommend(&inp);
        let spinnerbaits = rec
            .picks
            .iter()
            .filter(|p| p.lure == "Spinnerbait (double willow)")
            .count();
        assert_eq!(spinnerbaits, 2);
    }

    #[test]
    fn test_notes_order() {
        let mut inp = input(Species::Largemouth, Season::Winter);
        inp.clarity = Some(Clarity::Clear);
        inp.water_temp_f = Some(41.0);
        let rec = recommend(&inp);
        assert_eq!(rec.notes, vec![NOTE_CLEAR.to_string(), NOTE_COLD.to_string()]);

        inp.clarity = Some(Clarity::Muddy);
        let rec = recommend(&inp);
        assert_eq!(rec.notes, vec![NOTE_MUDDY.to_string(), NOTE_COLD.to_string()]);
    }

    #[test]
    fn test_cold_note_needs_water_temperature() {
        let mut inp = input(Species::Smallmouth, Season::Winter);
        inp.water_temp_f = None;
        assert!(recommend(&inp).notes.is_empty());

        inp.water_temp_f = Some(45.0);
        assert!(recommend(&inp).notes.is_empty());

        inp.water_temp_f = Some(44.9);
        assert_eq!(recommend(&inp).notes, vec![NOTE_COLD.to_string()]);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let a = Pick::new("Jig", "black/blue", "3/8 oz", "Crawl.");
        let b = Pick::new("Jerkbait", "shad", "", "Pause.");
        let out = dedupe_capped(vec![a.clone(), b.clone(), a.clone()], MAX_PICKS);
        assert_eq!(out, vec![a, b]);
    }
}
