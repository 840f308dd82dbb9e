use anyhow::Context;

use crate::config::Config;
use crate::model::{ClassifiedGame, GameRecord, Outcome, ResultCode, DRAW};

/// Whether a game counts at all. Runs before classification; an excluded
/// game is never classified.
pub fn is_relevant(game: &GameRecord, cfg: &Config) -> bool {
    if !cfg.time_class.is_empty() && game.time_class != cfg.time_class {
        return false;
    }
    if cfg.opponent.is_empty() {
        return true;
    }
    game.white.username.eq_ignore_ascii_case(&cfg.opponent)
        || game.black.username.eq_ignore_ascii_case(&cfg.opponent)
}

/// Decide the winner from the tracked player's seat: their own username on
/// a win code, the counterpart's on a loss code, [`DRAW`] otherwise.
/// Usernames are recorded as the API spelled them.
pub fn classify(game: &GameRecord, tracked: &str) -> anyhow::Result<ClassifiedGame> {
    let (mine, theirs) = if game.white.username.eq_ignore_ascii_case(tracked) {
        (&game.white, &game.black)
    } else if game.black.username.eq_ignore_ascii_case(tracked) {
        (&game.black, &game.white)
    } else {
        anyhow::bail!(
            "tracked player {:?} is in neither seat ({:?} vs {:?})",
            tracked,
            game.white.username,
            game.black.username
        );
    };

    let code = ResultCode::parse(&mine.result).with_context(|| {
        format!("game {} vs {}", game.white.username, game.black.username)
    })?;
    let winner = match code.outcome() {
        Outcome::Win => mine.username.clone(),
        Outcome::Loss => theirs.username.clone(),
        Outcome::Draw => DRAW.to_string(),
    };
    Ok(ClassifiedGame {
        white: game.white.username.clone(),
        black: game.black.username.clone(),
        winner,
    })
}

/// Filter then classify one fetched month.
pub fn classify_month(games: &[GameRecord], cfg: &Config) -> anyhow::Result<Vec<ClassifiedGame>> {
    let tracked = cfg.player()?;
    games
        .iter()
        .filter(|g| is_relevant(g, cfg))
        .map(|g| classify(g, tracked))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerSeat;

    fn game(white: (&str, &str), black: (&str, &str), time_class: &str) -> GameRecord {
        GameRecord {
            white: PlayerSeat {
                username: white.0.into(),
                result: white.1.into(),
            },
            black: PlayerSeat {
                username: black.0.into(),
                result: black.1.into(),
            },
            time_class: time_class.into(),
        }
    }

    fn cfg(player: &str, opponent: &str, time_class: &str) -> Config {
        Config {
            player: player.into(),
            opponent: opponent.into(),
            time_class: time_class.into(),
            ..Config::default()
        }
    }

    #[test]
    fn win_code_names_the_tracked_player() {
        let g = game(("alice", "win"), ("bob", "checkmated"), "daily");
        let c = classify(&g, "alice").unwrap();
        assert_eq!(c.winner, "alice");
        assert_eq!((c.white.as_str(), c.black.as_str()), ("alice", "bob"));
    }

    #[test]
    fn resignation_awards_the_counterpart() {
        // Tracked player resigned as white; the black seat takes the win.
        let g = game(("alice", "resigned"), ("bob", "win"), "daily");
        let c = classify(&g, "alice").unwrap();
        assert_eq!(c.winner, "bob");
    }

    #[test]
    fn loss_code_from_the_black_seat() {
        let g = game(("bob", "win"), ("alice", "timeout"), "daily");
        let c = classify(&g, "alice").unwrap();
        assert_eq!(c.winner, "bob");
    }

    #[test]
    fn stalemate_is_a_draw() {
        let g = game(("alice", "stalemate"), ("bob", "stalemate"), "daily");
        assert_eq!(classify(&g, "alice").unwrap().winner, DRAW);
    }

    #[test]
    fn unknown_code_bubbles_up() {
        let g = game(("alice", "berserk"), ("bob", "win"), "daily");
        let err = classify(&g, "alice").unwrap_err();
        assert!(format!("{err:#}").contains("berserk"));
    }

    #[test]
    fn seat_lookup_ignores_case() {
        let g = game(("Alice", "win"), ("bob", "resigned"), "daily");
        assert_eq!(classify(&g, "alice").unwrap().winner, "Alice");
    }

    #[test]
    fn absent_tracked_player_is_an_error() {
        let g = game(("carol", "win"), ("bob", "resigned"), "daily");
        assert!(classify(&g, "alice").is_err());
    }

    #[test]
    fn wrong_time_class_is_irrelevant() {
        let g = game(("alice", "win"), ("bob", "checkmated"), "blitz");
        assert!(!is_relevant(&g, &cfg("alice", "bob", "daily")));
        assert!(is_relevant(&g, &cfg("alice", "bob", "")));
    }

    #[test]
    fn games_without_the_opponent_are_irrelevant() {
        let g = game(("alice", "win"), ("carol", "checkmated"), "daily");
        assert!(!is_relevant(&g, &cfg("alice", "bob", "daily")));
        assert!(is_relevant(&g, &cfg("alice", "", "daily")));
    }

    #[test]
    fn classify_month_never_touches_excluded_games() {
        // The unknown code sits in an excluded game, so the month still
        // classifies cleanly.
        let games = [
            game(("alice", "berserk"), ("carol", "win"), "daily"),
            game(("alice", "win"), ("bob", "checkmated"), "daily"),
        ];
        let out = classify_month(&games, &cfg("alice", "bob", "daily")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].winner, "alice");
    }
}
