use std::collections::BTreeMap;

use anyhow::Context;

use crate::model::{GamesByPeriod, MonthlyTally};

/// Year -> month -> tally, mirroring the layout of the games file. Months
/// absent from the file stay absent here; the chart layer zero-fills.
pub type TallyMap = BTreeMap<String, BTreeMap<String, MonthlyTally>>;

/// Fold every period of the games file into counters. Pure recomputation:
/// running it twice over the same file gives identical tallies.
pub fn tally_all(games: &GamesByPeriod, tracked: &str) -> anyhow::Result<TallyMap> {
    let mut out = TallyMap::new();
    for (year, months) in games {
        for (month, list) in months {
            let mut tally = MonthlyTally::default();
            for game in list {
                tally
                    .record(game, tracked)
                    .with_context(|| format!("{year}-{month}"))?;
            }
            out.entry(year.clone()).or_default().insert(month.clone(), tally);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassifiedGame, DRAW};

    fn game(white: &str, black: &str, winner: &str) -> ClassifiedGame {
        ClassifiedGame {
            white: white.into(),
            black: black.into(),
            winner: winner.into(),
        }
    }

    fn sample() -> GamesByPeriod {
        let mut games = GamesByPeriod::new();
        games.entry("2021".into()).or_default().insert(
            "05".into(),
            vec![
                game("alice", "bob", "alice"),
                game("bob", "alice", "bob"),
                game("alice", "bob", DRAW),
            ],
        );
        games.entry("2021".into()).or_default().insert(
            "07".into(),
            vec![game("bob", "alice", "alice")],
        );
        games
    }

    #[test]
    fn counters_sum_to_period_game_counts() {
        let tallies = tally_all(&sample(), "alice").unwrap();
        assert_eq!(tallies["2021"]["05"].total(), 3);
        assert_eq!(tallies["2021"]["07"].total(), 1);
    }

    #[test]
    fn counters_land_where_the_seats_say() {
        let tallies = tally_all(&sample(), "alice").unwrap();
        let may = &tallies["2021"]["05"];
        assert_eq!(may.wins_as_white, 1);
        assert_eq!(may.losses_as_black, 1);
        assert_eq!(may.draws, 1);
        assert_eq!(tallies["2021"]["07"].wins_as_black, 1);
    }

    #[test]
    fn reaggregation_is_idempotent() {
        let games = sample();
        let first = tally_all(&games, "alice").unwrap();
        let second = tally_all(&games, "alice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_periods() {
        assert!(tally_all(&GamesByPeriod::new(), "alice").unwrap().is_empty());
    }

    #[test]
    fn bad_record_carries_its_period_in_the_error() {
        let mut games = GamesByPeriod::new();
        games
            .entry("2022".into())
            .or_default()
            .insert("03".into(), vec![game("alice", "bob", "carol")]);
        let err = tally_all(&games, "alice").unwrap_err();
        assert!(format!("{err:#}").contains("2022-03"));
    }
}
