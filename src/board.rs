//! The board engine: setup placement, picking, stepping, bouncing, swapping,
//! undo and victory.
//!
//! All commands validate first and only then mutate, so a returned error
//! always leaves the board exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    BounceMode, Direction, EngineError, EngineResult, FrontierRule, Grid, Player, Pos, Rules, Size,
    Step, StepHistory, DIMENSION,
};

/// The piece currently lifted off the grid.
///
/// While a piece is picked its size is not stored in the grid; the cell at
/// `pos` holds whatever piece (if any) it is hovering over.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct PickedPiece {
    pub owner: Player,
    pub size: Size,
    pub pos: Pos,
    pub moves_remaining: u8,
    /// Cell the piece was picked from; `cancel_movement` puts it back here.
    pub origin: Pos,
}

/// What a successful `move_piece` did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Moved onto an empty cell with budget left; still in hand.
    Stepped { pos: Pos, moves_remaining: u8 },
    /// Spent the last step on an occupied cell; bounce or swap next.
    Hovering { pos: Pos, under: Size },
    /// Budget refilled from the piece underneath without moving.
    Recharged { moves_remaining: u8 },
    /// Spent the last step on an empty cell; the turn segment is over.
    Landed { pos: Pos },
    /// Left the board through the goal.
    Goal { winner: Player },
}

/// Full engine state. `Clone` produces an independent deep copy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Grid,
    /// placed[player][size] pieces already put down during setup.
    placed: [[u8; 3]; 2],
    rules: Rules,
    picked: Option<PickedPiece>,
    history: StepHistory,
    winner: Option<Player>,
}

impl Board {
    /// Create an empty board with the standard rules.
    pub fn new() -> Board {
        Board {
            grid: Grid::new(),
            placed: [[0; 3]; 2],
            rules: Rules::STANDARD,
            picked: None,
            history: StepHistory::new(),
            winner: None,
        }
    }

    /// Create an empty board with custom rules.
    pub fn with_rules(rules: Rules) -> EngineResult<Board> {
        rules.validate()?;
        Ok(Board { rules, ..Board::new() })
    }

    /// Start from an arbitrary grid with setup already finished.
    ///
    /// Every placement quota is treated as spent, so the board is ready for
    /// picking.
    pub fn from_grid(grid: Grid, rules: Rules) -> EngineResult<Board> {
        let mut board = Board::with_rules(rules)?;
        board.grid = grid;
        board.placed = [[rules.initial_pieces; 3]; 2];
        Ok(board)
    }

    /// Independent copy of the whole state, for lookahead or save states.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    // ========== Queries ==========

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Size of the piece resting on the grid at (row, col). `None` for empty
    /// or off-board cells. The picked piece is never reported here.
    pub fn piece_size(&self, row: usize, col: usize) -> Option<Size> {
        Pos::new(row, col).and_then(|pos| self.grid.get(pos))
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn picked(&self) -> Option<&PickedPiece> {
        self.picked.as_ref()
    }

    pub fn picked_owner(&self) -> Option<Player> {
        self.picked.map(|p| p.owner)
    }

    pub fn picked_size(&self) -> Option<Size> {
        self.picked.map(|p| p.size)
    }

    pub fn picked_pos(&self) -> Option<Pos> {
        self.picked.map(|p| p.pos)
    }

    /// Steps left for the picked piece, `None` when nothing is picked.
    pub fn movement_left(&self) -> Option<u8> {
        self.picked.map(|p| p.moves_remaining)
    }

    #[inline]
    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    /// Number of steps that `cancel_step` can still roll back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Piece under the picked piece, if it is hovering over one.
    pub fn hovering_over(&self) -> Option<Size> {
        self.picked.and_then(|p| self.grid.get(p.pos))
    }

    /// Out of budget while above another piece: the next cardinal move recharges.
    fn bounce_source(&self, picked: &PickedPiece) -> Option<Size> {
        if picked.moves_remaining == 0 {
            self.grid.get(picked.pos)
        } else {
            None
        }
    }

    // ========== Setup ==========

    /// Pieces of this size the player may still place.
    pub fn placeable(&self, size: Size, player: Player) -> u8 {
        self.rules
            .initial_pieces
            .saturating_sub(self.placed[player.index()][size.index()])
    }

    /// Check if the player has any piece left to place.
    pub fn has_pieces_to_place(&self, player: Player) -> bool {
        Size::all().any(|size| self.placeable(size, player) > 0)
    }

    /// Check if both players have placed their whole quota.
    pub fn setup_complete(&self) -> bool {
        Player::all().all(|player| !self.has_pieces_to_place(player))
    }

    /// Place a piece on the player's home row.
    pub fn place(&mut self, size: Size, player: Player, column: usize) -> EngineResult<()> {
        let row = player.home_row();
        match self.validate_place(size, player, row, column) {
            Ok(pos) => {
                self.grid.set(pos, Some(size));
                self.placed[player.index()][size.index()] += 1;
                debug!(?player, ?size, row, column, "placed piece");
                Ok(())
            }
            Err(err) => {
                debug!(?player, ?size, column, %err, "placement rejected");
                Err(err)
            }
        }
    }

    fn validate_place(&self, size: Size, player: Player, row: usize, column: usize) -> EngineResult<Pos> {
        let pos = Pos::new(row, column).ok_or(EngineError::OutOfBounds {
            row: row as i64,
            col: column as i64,
        })?;
        if self.placeable(size, player) == 0 {
            return Err(EngineError::QuotaExhausted { size: size.steps() });
        }
        if !self.grid.is_empty(pos) {
            return Err(EngineError::CellOccupied { row, col: column });
        }
        Ok(pos)
    }

    // ========== Frontier ==========

    /// Lowest row index holding any piece.
    pub fn southmost_occupied_row(&self) -> Option<usize> {
        self.grid.occupied_rows().next()
    }

    /// Highest row index holding any piece.
    pub fn northmost_occupied_row(&self) -> Option<usize> {
        self.grid.occupied_rows().next_back()
    }

    /// Check if the piece at `pos` could leave its cell on the player's behalf:
    /// an orthogonal neighbour is free, a size-one piece can step onto any
    /// neighbour, and any piece on the player's goal row can enter the goal.
    pub fn is_piece_mobile(&self, pos: Pos, player: Player) -> bool {
        let Some(size) = self.grid.get(pos) else {
            return false;
        };
        let free_neighbour = Direction::cardinals()
            .filter_map(|dir| pos.step(dir))
            .any(|next| self.grid.is_empty(next) || size == Size::One);

        free_neighbour || pos.row() == player.goal_row()
    }

    /// Row the player must pick from, recomputed from the current grid.
    pub fn frontier_row(&self, player: Player) -> Option<usize> {
        match self.rules.frontier {
            FrontierRule::Occupancy => match player {
                Player::South => self.southmost_occupied_row(),
                Player::North => self.northmost_occupied_row(),
            },
            FrontierRule::Mobility => {
                let has_mobile = |row: &usize| {
                    (0..DIMENSION).any(|col| self.is_piece_mobile(Pos::from_row_col(*row, col), player))
                };
                match player {
                    Player::South => (0..DIMENSION).find(has_mobile),
                    Player::North => (0..DIMENSION).rev().find(has_mobile),
                }
            }
        }
    }

    // ========== Pick ==========

    /// Positions the player may currently pick from.
    pub fn pickable(&self, player: Player) -> Vec<Pos> {
        if self.winner.is_some() || self.picked.is_some() {
            return Vec::new();
        }
        match self.frontier_row(player) {
            Some(row) => (0..DIMENSION)
                .map(|col| Pos::from_row_col(row, col))
                .filter(|&pos| !self.grid.is_empty(pos))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Lift a piece off the grid and start a turn segment.
    pub fn pick(&mut self, player: Player, row: usize, col: usize) -> EngineResult<()> {
        match self.validate_pick(player, row, col) {
            Ok((pos, size)) => {
                self.grid.set(pos, None);
                self.picked = Some(PickedPiece {
                    owner: player,
                    size,
                    pos,
                    moves_remaining: size.steps(),
                    origin: pos,
                });
                self.history.clear();
                debug!(?player, ?size, row, col, "picked piece");
                Ok(())
            }
            Err(err) => {
                debug!(?player, row, col, %err, "pick rejected");
                Err(err)
            }
        }
    }

    fn validate_pick(&self, player: Player, row: usize, col: usize) -> EngineResult<(Pos, Size)> {
        if self.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        if self.picked.is_some() {
            return Err(EngineError::AlreadyPicked);
        }
        let pos = Pos::new(row, col).ok_or(EngineError::OutOfBounds {
            row: row as i64,
            col: col as i64,
        })?;
        let size = self.grid.get(pos).ok_or(EngineError::CellEmpty { row, col })?;
        if self.frontier_row(player) != Some(row) {
            return Err(EngineError::NotFrontier { row });
        }
        Ok((pos, size))
    }

    // ========== Movement ==========

    /// Check whether `move_piece(direction)` would succeed.
    pub fn is_move_possible(&self, direction: Direction) -> bool {
        self.validate_move(direction).is_ok()
    }

    /// Directions currently accepted by `move_piece`.
    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::all().filter(|&dir| self.is_move_possible(dir)).collect()
    }

    fn validate_move(&self, direction: Direction) -> EngineResult<PickedPiece> {
        let picked = self.picked.ok_or(EngineError::NothingPicked)?;
        let forbidden = EngineError::MoveForbidden { direction };

        if direction == Direction::Goal {
            return if picked.pos.row() == picked.owner.goal_row() {
                Ok(picked)
            } else {
                Err(forbidden)
            };
        }

        let target = picked.pos.step(direction).ok_or(forbidden)?;
        let target_free = self.grid.is_empty(target);

        let legal = if self.bounce_source(&picked).is_some() {
            // Bouncing off a piece only ever leads onto a free cell.
            target_free
        } else if picked.moves_remaining == 0 {
            false
        } else {
            // An occupied cell can only be the last step.
            target_free || picked.moves_remaining == 1
        };
        if !legal {
            return Err(forbidden);
        }
        if self.history.is_full() {
            return Err(EngineError::HistoryFull);
        }
        Ok(picked)
    }

    /// Apply one step (or the goal move) to the picked piece.
    pub fn move_piece(&mut self, direction: Direction) -> EngineResult<MoveOutcome> {
        let mut piece = match self.validate_move(direction) {
            Ok(piece) => piece,
            Err(err) => {
                debug!(?direction, %err, "move rejected");
                return Err(err);
            }
        };

        if direction == Direction::Goal {
            self.winner = Some(piece.owner);
            self.picked = None;
            self.history.clear();
            debug!(winner = ?piece.owner, size = ?piece.size, "piece reached the goal");
            return Ok(MoveOutcome::Goal { winner: piece.owner });
        }

        let before = Step { pos: piece.pos, moves_remaining: piece.moves_remaining };

        if let Some(under) = self.bounce_source(&piece) {
            piece.moves_remaining = under.steps();
            if self.rules.bounce == BounceMode::RechargeThenWait {
                self.history.push(before)?;
                self.picked = Some(piece);
                trace!(pos = piece.pos.0, moves = piece.moves_remaining, "recharged from piece below");
                return Ok(MoveOutcome::Recharged { moves_remaining: piece.moves_remaining });
            }
        }

        let target = piece
            .pos
            .step(direction)
            .ok_or(EngineError::MoveForbidden { direction })?;
        self.history.push(before)?;
        piece.pos = target;
        piece.moves_remaining -= 1;

        let outcome = match self.grid.get(target) {
            Some(under) => {
                self.picked = Some(piece);
                MoveOutcome::Hovering { pos: target, under }
            }
            None if piece.moves_remaining == 0 => {
                self.grid.set(target, Some(piece.size));
                self.picked = None;
                self.history.clear();
                debug!(row = target.row(), col = target.col(), size = ?piece.size, "piece landed");
                MoveOutcome::Landed { pos: target }
            }
            None => {
                self.picked = Some(piece);
                MoveOutcome::Stepped { pos: target, moves_remaining: piece.moves_remaining }
            }
        };
        trace!(?direction, ?outcome, "step applied");
        Ok(outcome)
    }

    // ========== Swap ==========

    /// End the turn segment by trading places with the piece underneath:
    /// that piece moves to (row, col) and the picked piece takes its cell.
    pub fn swap(&mut self, row: usize, col: usize) -> EngineResult<()> {
        match self.validate_swap(row, col) {
            Ok((picked, under, target)) => {
                self.grid.set(target, Some(under));
                self.grid.set(picked.pos, Some(picked.size));
                self.picked = None;
                self.history.clear();
                debug!(row, col, displaced = ?under, "swapped pieces");
                Ok(())
            }
            Err(err) => {
                debug!(row, col, %err, "swap rejected");
                Err(err)
            }
        }
    }

    fn validate_swap(&self, row: usize, col: usize) -> EngineResult<(PickedPiece, Size, Pos)> {
        let picked = self.picked.ok_or(EngineError::NothingPicked)?;
        let under = self.grid.get(picked.pos).ok_or(EngineError::NotHovering)?;
        let target = Pos::new(row, col).ok_or(EngineError::OutOfBounds {
            row: row as i64,
            col: col as i64,
        })?;
        if !self.grid.is_empty(target) {
            return Err(EngineError::SwapTargetOccupied { row, col });
        }
        Ok((picked, under, target))
    }

    // ========== Undo ==========

    /// Roll back the most recent step. With no step recorded this cancels the
    /// whole movement.
    pub fn cancel_step(&mut self) -> EngineResult<()> {
        let Some(mut piece) = self.picked else {
            debug!("cancel_step with nothing picked");
            return Err(EngineError::NothingPicked);
        };
        match self.history.pop() {
            Some(step) => {
                piece.pos = step.pos;
                piece.moves_remaining = step.moves_remaining;
                self.picked = Some(piece);
                trace!(pos = step.pos.0, moves = step.moves_remaining, "step cancelled");
                Ok(())
            }
            None => self.cancel_movement(),
        }
    }

    /// Put the picked piece back where it was picked from.
    pub fn cancel_movement(&mut self) -> EngineResult<()> {
        let Some(piece) = self.picked.take() else {
            debug!("cancel_movement with nothing picked");
            return Err(EngineError::NothingPicked);
        };
        self.grid.set(piece.origin, Some(piece.size));
        self.history.clear();
        debug!(row = piece.origin.row(), col = piece.origin.col(), "movement cancelled");
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
