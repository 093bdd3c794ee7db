//! Rule walkthroughs played through the public API only.

use gyges_core::{
    Board, Direction, EngineError, Grid, MoveOutcome, Player, Pos, ReturnCode, Rules, Size,
    DIMENSION,
};

fn board_with(pieces: &[(usize, usize, Size)], rules: Rules) -> Board {
    let mut grid = Grid::new();
    for &(row, col, size) in pieces {
        grid.set(Pos::from_row_col(row, col), Some(size));
    }
    Board::from_grid(grid, rules).unwrap()
}

/// South: 1 1 2 2 3 3 on row 0, North: 3 3 2 2 1 1 on row 5.
fn standard_setup() -> Board {
    let mut board = Board::new();
    let south = [Size::One, Size::One, Size::Two, Size::Two, Size::Three, Size::Three];
    for col in 0..DIMENSION {
        board.place(south[col], Player::South, col).unwrap();
        board.place(south[DIMENSION - 1 - col], Player::North, col).unwrap();
    }
    board
}

#[test]
fn test_first_move_lands_one_row_up() {
    let mut board = Board::new();
    board.place(Size::One, Player::South, 0).unwrap();
    board.place(Size::Two, Player::North, 0).unwrap();

    board.pick(Player::South, 0, 0).unwrap();
    assert_eq!(board.movement_left(), Some(1));
    let outcome = board.move_piece(Direction::North).unwrap();

    assert_eq!(outcome, MoveOutcome::Landed { pos: Pos::from_row_col(1, 0) });
    assert_eq!(board.piece_size(0, 0), None);
    assert_eq!(board.piece_size(1, 0), Some(Size::One));
    assert_eq!(board.piece_size(5, 0), Some(Size::Two));
    assert_eq!(board.movement_left(), None);
}

#[test]
fn test_bounce_waits_for_recharge() {
    let mut board = board_with(
        &[(0, 0, Size::Two), (1, 1, Size::Three), (5, 5, Size::One)],
        Rules::STANDARD,
    );
    board.pick(Player::South, 0, 0).unwrap();
    board.move_piece(Direction::East).unwrap();
    board.move_piece(Direction::North).unwrap();
    assert_eq!(board.movement_left(), Some(0));
    assert!(!board.is_move_possible(Direction::Goal));

    // The resume call only recharges.
    let hovering_at = board.picked_pos();
    board.move_piece(Direction::North).unwrap();
    assert_eq!(board.picked_pos(), hovering_at);
    assert_eq!(board.movement_left(), Some(3));

    board.move_piece(Direction::North).unwrap();
    assert_eq!(board.picked_pos(), Some(Pos::from_row_col(2, 1)));
    assert_eq!(board.movement_left(), Some(2));
}

#[test]
fn test_swap_without_hover_is_forbidden() {
    let mut board = standard_setup();
    board.pick(Player::South, 0, 2).unwrap();
    let before = board.clone();

    let result = board.swap(3, 3);
    assert_eq!(result, Err(EngineError::NotHovering));
    assert_eq!(ReturnCode::from(&result), ReturnCode::Forbidden);
    assert_eq!(board, before);
}

#[test]
fn test_cancel_with_nothing_picked() {
    let mut board = standard_setup();
    let before = board.clone();

    let result = board.cancel_movement();
    assert_eq!(result, Err(EngineError::NothingPicked));
    assert_eq!(ReturnCode::from(&result), ReturnCode::Empty);
    assert_eq!(board, before);
}

#[test]
fn test_setup_then_first_turns() {
    let mut board = standard_setup();
    assert!(board.setup_complete());
    assert_eq!(board.grid().count(), 12);
    assert_eq!(board.pickable(Player::South).len(), 6);
    assert_eq!(board.pickable(Player::North).len(), 6);

    // Placement is closed once every quota is spent.
    assert_eq!(
        board.place(Size::One, Player::South, 0),
        Err(EngineError::QuotaExhausted { size: 1 })
    );

    board.pick(Player::South, 0, 2).unwrap();
    board.move_piece(Direction::North).unwrap();
    assert_eq!(
        board.move_piece(Direction::North),
        Ok(MoveOutcome::Landed { pos: Pos::from_row_col(2, 2) })
    );

    board.pick(Player::North, 5, 4).unwrap();
    assert_eq!(
        board.move_piece(Direction::South),
        Ok(MoveOutcome::Landed { pos: Pos::from_row_col(4, 4) })
    );

    // North's frontier is still row 5; South's is still row 0.
    assert_eq!(board.frontier_row(Player::North), Some(5));
    assert_eq!(board.frontier_row(Player::South), Some(0));
    assert_eq!(board.grid().count(), 12);
}

#[test]
fn test_walk_into_goal_with_steps_left() {
    let mut board = board_with(&[(3, 0, Size::Three), (5, 5, Size::Two)], Rules::STANDARD);
    board.pick(Player::South, 3, 0).unwrap();
    board.move_piece(Direction::North).unwrap();
    board.move_piece(Direction::North).unwrap();
    assert_eq!(board.movement_left(), Some(1));

    assert_eq!(board.legal_directions(), vec![Direction::South, Direction::East, Direction::Goal]);
    assert_eq!(board.move_piece(Direction::Goal), Ok(MoveOutcome::Goal { winner: Player::South }));
    assert_eq!(board.winner(), Some(Player::South));

    for player in Player::all() {
        let result = board.pick(player, 5, 5);
        assert_eq!(ReturnCode::from(&result), ReturnCode::Forbidden);
    }
}

#[test]
fn test_goal_from_hover() {
    let mut board = board_with(&[(4, 1, Size::One), (5, 1, Size::Three)], Rules::STANDARD);
    board.pick(Player::South, 4, 1).unwrap();
    assert_eq!(
        board.move_piece(Direction::North),
        Ok(MoveOutcome::Hovering { pos: Pos::from_row_col(5, 1), under: Size::Three })
    );
    assert!(board.is_move_possible(Direction::Goal));
    board.move_piece(Direction::Goal).unwrap();
    assert_eq!(board.winner(), Some(Player::South));
    assert_eq!(board.piece_size(5, 1), Some(Size::Three));
}

#[test]
fn test_swap_moves_displaced_piece() {
    let mut board = standard_setup();
    // Size one from (0,0) steps onto its neighbour on row 0.
    board.pick(Player::South, 0, 0).unwrap();
    assert_eq!(
        board.move_piece(Direction::East),
        Ok(MoveOutcome::Hovering { pos: Pos::from_row_col(0, 1), under: Size::One })
    );
    board.swap(2, 3).unwrap();

    assert_eq!(board.piece_size(0, 0), None);
    assert_eq!(board.piece_size(0, 1), Some(Size::One));
    assert_eq!(board.piece_size(2, 3), Some(Size::One));
    assert_eq!(board.picked(), None);
    assert_eq!(board.grid().count(), 12);
}

#[test]
fn test_unwinding_matches_cancel_movement() {
    let mut board = board_with(
        &[(0, 0, Size::One), (1, 0, Size::Three), (5, 5, Size::One)],
        Rules::STANDARD,
    );
    board.pick(Player::South, 0, 0).unwrap();
    board.move_piece(Direction::North).unwrap();
    board.move_piece(Direction::East).unwrap();
    board.move_piece(Direction::North).unwrap();
    board.move_piece(Direction::North).unwrap();
    assert_eq!(board.history_len(), 4);

    let mut cancelled = board.clone();
    cancelled.cancel_movement().unwrap();

    while board.history_len() > 0 {
        board.cancel_step().unwrap();
        assert!(board.picked().is_some());
    }
    board.cancel_step().unwrap();
    assert_eq!(board, cancelled);
    assert_eq!(board.piece_size(0, 0), Some(Size::One));
}

#[test]
fn test_immediate_bounce_rules() {
    let mut board = board_with(
        &[(0, 0, Size::One), (1, 0, Size::Three), (5, 5, Size::One)],
        Rules::IMMEDIATE_BOUNCE,
    );
    board.pick(Player::South, 0, 0).unwrap();
    board.move_piece(Direction::North).unwrap();

    assert_eq!(
        board.move_piece(Direction::North),
        Ok(MoveOutcome::Stepped { pos: Pos::from_row_col(2, 0), moves_remaining: 2 })
    );
    board.cancel_step().unwrap();
    assert_eq!(board.picked_pos(), Some(Pos::from_row_col(1, 0)));
    assert_eq!(board.movement_left(), Some(0));
}

#[test]
fn test_mobility_frontier_rules() {
    // South's home row is jammed: big pieces with full rows around them.
    let mut pieces = Vec::new();
    for col in 0..DIMENSION {
        pieces.push((0, col, Size::Three));
        pieces.push((1, col, Size::Two));
    }
    pieces.push((5, 0, Size::One));

    let mut standard = board_with(&pieces, Rules::STANDARD);
    let mut mobile = board_with(&pieces, Rules::MOBILE_FRONTIER);

    assert!(standard.pick(Player::South, 0, 3).is_ok());
    assert_eq!(mobile.pick(Player::South, 0, 3), Err(EngineError::NotFrontier { row: 0 }));
    mobile.pick(Player::South, 1, 3).unwrap();

    standard.cancel_movement().unwrap();
    assert_eq!(standard.pickable(Player::North), vec![Pos::from_row_col(5, 0)]);
}

#[test]
fn test_rules_validation() {
    assert!(Board::with_rules(Rules { initial_pieces: 3, ..Rules::STANDARD }).is_err());
    let result = Board::with_rules(Rules { initial_pieces: 0, ..Rules::STANDARD });
    assert_eq!(result.map(|_| ()).unwrap_err().code(), ReturnCode::InvalidParam);
}
