//! Behavioral test suite for the board API.
//!
//! Covers the checked surface end to end: opening move sets, the three
//! malformed-argument error kinds, the `is_valid_move` / `valid_moves`
//! consistency contract, terminal scoring boundaries, and full random
//! playouts.

use std::collections::HashSet;

use rand::Rng;
use reversi_core::{Board, BoardError, Cell, Player, Square};

fn square_set(moves: &[Square]) -> HashSet<(u8, u8)> {
    moves.iter().map(|sq| (sq.row(), sq.col())).collect()
}

fn expected_set(pairs: &[(u8, u8)]) -> HashSet<(u8, u8)> {
    pairs.iter().copied().collect()
}

#[test]
fn opening_moves_for_player_one() {
    let board = Board::new();
    let expected = [(2, 3), (3, 2), (4, 5), (5, 4)];
    for &(r, c) in &expected {
        assert!(
            board.is_valid_move(1, r as i64, c as i64).unwrap(),
            "move ({r},{c}) should be valid"
        );
    }
    let moves = board.valid_moves(1).unwrap();
    assert_eq!(square_set(&moves), expected_set(&expected));
}

#[test]
fn opening_moves_for_player_two() {
    let board = Board::new();
    let expected = [(2, 4), (3, 5), (4, 2), (5, 3)];
    for &(r, c) in &expected {
        assert!(
            board.is_valid_move(2, r as i64, c as i64).unwrap(),
            "move ({r},{c}) should be valid"
        );
    }
    let moves = board.valid_moves(2).unwrap();
    assert_eq!(square_set(&moves), expected_set(&expected));
}

#[test]
fn empty_square_without_capture_is_not_valid() {
    let board = Board::new();
    assert_eq!(board.is_valid_move(1, 0, 0), Ok(false));
    assert_eq!(board.is_valid_move(2, 0, 0), Ok(false));
}

#[test]
fn occupied_square_is_not_valid() {
    let board = Board::new();
    // (3,3) holds a player-2 disc, (3,4) a player-1 disc.
    assert_eq!(board.is_valid_move(1, 3, 3), Ok(false));
    assert_eq!(board.is_valid_move(2, 3, 4), Ok(false));
}

#[test]
fn invalid_player_is_rejected() {
    let board = Board::new();
    for player in [0, 3, -1, 99] {
        assert_eq!(
            board.is_valid_move(player, 2, 3),
            Err(BoardError::InvalidPlayer(player))
        );
        assert_eq!(
            board.valid_moves(player).err(),
            Some(BoardError::InvalidPlayer(player))
        );
    }
}

#[test]
fn non_integer_coordinate_is_a_type_violation() {
    // The float path is the boundary form: JS and JSON numbers arrive as
    // floats. Fractional and non-finite values are a distinct kind from
    // both the player check and the range check.
    assert_eq!(
        Square::from_f64(2.5, 3.0),
        Err(BoardError::NonIntegerCoordinate)
    );
    assert_eq!(
        Square::from_f64(2.0, f64::INFINITY),
        Err(BoardError::NonIntegerCoordinate)
    );
    assert_eq!(
        Square::from_f64(f64::NAN, 3.0),
        Err(BoardError::NonIntegerCoordinate)
    );
}

#[test]
fn out_of_range_coordinate_is_rejected() {
    let board = Board::new();
    for (r, c) in [(-1, 0), (0, -1), (8, 0), (0, 8)] {
        let err = board.is_valid_move(1, r, c).unwrap_err();
        assert!(
            matches!(err, BoardError::CoordinateOutOfRange(_)),
            "expected range error for ({r},{c}), got {err:?}"
        );
    }
}

#[test]
fn is_valid_move_matches_valid_moves_everywhere() {
    // The two operations must agree square-for-square, for both players,
    // on the opening board and on a midgame board.
    let mut midgame = Board::new();
    midgame.apply_move(1, 2, 3).unwrap();
    midgame.apply_move(2, 2, 2).unwrap();
    midgame.apply_move(1, 3, 2).unwrap();

    for board in [Board::new(), midgame] {
        for player in [1i64, 2] {
            let produced = square_set(&board.valid_moves(player).unwrap());
            for r in 0..8i64 {
                for c in 0..8i64 {
                    assert_eq!(
                        board.is_valid_move(player, r, c).unwrap(),
                        produced.contains(&(r as u8, c as u8)),
                        "mismatch for player {player} at ({r},{c})"
                    );
                }
            }
        }
    }
}

#[test]
fn full_board_with_equal_counts_is_tied() {
    // 32 player-1 discs followed by 32 player-2 discs, no empty cells.
    let mut rows = [[0u8; 8]; 8];
    for r in 0..8 {
        for c in 0..8 {
            rows[r][c] = if r < 4 { 1 } else { 2 };
        }
    }
    let board = Board::of(&rows).unwrap();
    let res = board.result();
    assert!(res.finished);
    assert_eq!(res.player_one, 32);
    assert_eq!(res.player_two, 32);
    assert!(res.tied);
    assert_eq!(res.winner, 0);
}

#[test]
fn one_empty_cell_means_not_finished() {
    let mut rows = [[1u8; 8]; 8];
    rows[0][0] = 0;
    let board = Board::of(&rows).unwrap();
    let res = board.result();
    assert!(!res.finished);
    assert!(!res.tied);
    assert_eq!(res.winner, 0);
    assert_eq!(res.player_one, 63);
}

#[test]
fn near_sweep_win_for_player_one() {
    let mut rows = [[1u8; 8]; 8];
    rows[0][0] = 2;
    let res = Board::of(&rows).unwrap().result();
    assert!(res.finished);
    assert!(!res.tied);
    assert_eq!(res.winner, 1);
    assert_eq!((res.player_one, res.player_two), (63, 1));
}

#[test]
fn near_sweep_win_for_player_two() {
    let mut rows = [[2u8; 8]; 8];
    rows[0][0] = 1;
    let res = Board::of(&rows).unwrap().result();
    assert!(res.finished);
    assert!(!res.tied);
    assert_eq!(res.winner, 2);
    assert_eq!((res.player_one, res.player_two), (1, 63));
}

#[test]
fn result_serializes_with_original_field_names() {
    let res = Board::new().result();
    let value = serde_json::to_value(res).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "finished": false,
            "playerOne": 2,
            "playerTwo": 2,
            "tied": false,
            "winner": 0,
        })
    );
}

#[test]
fn factory_rejects_malformed_grids() {
    let short: Vec<Vec<u8>> = vec![vec![0; 8]; 6];
    assert_eq!(Board::of(&short).err(), Some(BoardError::InvalidGrid));

    let mut wide: Vec<Vec<u8>> = vec![vec![0; 8]; 8];
    wide[7] = vec![0; 10];
    assert_eq!(Board::of(&wide).err(), Some(BoardError::InvalidGrid));

    let mut bad_value = [[0u8; 8]; 8];
    bad_value[2][6] = 9;
    assert_eq!(Board::of(&bad_value).err(), Some(BoardError::InvalidGrid));
}

#[test]
fn factory_round_trips_cell_states() {
    let mut rows = [[0u8; 8]; 8];
    rows[0][0] = 1;
    rows[7][7] = 2;
    let board = Board::of(&rows).unwrap();
    assert_eq!(board.cell(Square::new(0, 0).unwrap()), Cell::PlayerOne);
    assert_eq!(board.cell(Square::new(7, 7).unwrap()), Cell::PlayerTwo);
    assert_eq!(board.cell(Square::new(4, 4).unwrap()), Cell::Empty);
}

#[test]
fn random_playouts_preserve_invariants() {
    let mut rng = rand::rng();

    for _ in 0..20 {
        let mut board = Board::new();
        let mut mover = Player::One;
        let mut passes = 0;

        while passes < 2 {
            let moves = board.legal_moves(mover);
            if moves.is_empty() {
                passes += 1;
            } else {
                passes = 0;
                let sq = moves[rng.random_range(0..moves.len())];
                let flipped = board
                    .apply_move(mover as i64, sq.row() as i64, sq.col() as i64)
                    .unwrap();
                assert!(flipped >= 1, "a legal move must flip at least one disc");
            }
            mover = mover.opponent();

            let res = board.result();
            let empty = Square::all()
                .filter(|&sq| board.cell(sq) == Cell::Empty)
                .count() as u8;
            assert_eq!(res.player_one + res.player_two + empty, 64);
            assert_eq!(res.finished, empty == 0);
            if res.tied {
                assert!(res.finished && res.player_one == res.player_two);
            }
            if !res.finished || res.tied {
                assert_eq!(res.winner, 0);
            }
        }
    }
}
