//! WASM bindings for gyges-core
//!
//! Exposes the board engine to a JavaScript renderer using plain numbers:
//! players are 0 (none), 1 (South), 2 (North); sizes 0 (empty) to 3;
//! directions 0 (North), 1 (South), 2 (East), 3 (West), 4 (Goal).
//! Commands return a `ReturnCode` as `u8`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    Board, Direction, EngineError, EngineResult, Player, Pos, ReturnCode, Rules, Size, DIMENSION,
};

fn player_from_code(code: u8) -> EngineResult<Player> {
    Player::from_bits(code).ok_or(EngineError::InvalidPlayer { player: code })
}

fn size_from_code(code: u8) -> EngineResult<Size> {
    Size::from_steps(code).ok_or(EngineError::InvalidSize { size: code })
}

fn direction_from_code(code: u8) -> EngineResult<Direction> {
    Direction::from_index(code).ok_or(EngineError::InvalidDirection { direction: code })
}

fn player_code(player: Option<Player>) -> u8 {
    player.map_or(0, |p| p as u8)
}

fn size_code(size: Option<Size>) -> u8 {
    size.map_or(0, Size::steps)
}

fn direction_code(direction: Direction) -> u8 {
    match direction {
        Direction::North => 0,
        Direction::South => 1,
        Direction::East => 2,
        Direction::West => 3,
        Direction::Goal => 4,
    }
}

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmGame {
    inner: Board,
    last_error: Option<EngineError>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game with the standard rules
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Board::new(), last_error: None }
    }

    /// Create a game from a rules object, e.g. `{ bounce: "recharge_and_step" }`.
    /// Missing fields fall back to the standard rules.
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(rules: JsValue) -> Result<WasmGame, JsError> {
        let rules: Rules = serde_wasm_bindgen::from_value(rules)?;
        Ok(WasmGame { inner: Board::with_rules(rules)?, last_error: None })
    }

    // ========== Commands ==========

    /// Place a piece of `size` on the player's home row.
    pub fn place(&mut self, size: u8, player: u8, column: u8) -> u8 {
        let result = size_from_code(size).and_then(|size| {
            let player = player_from_code(player)?;
            self.inner.place(size, player, column as usize)
        });
        self.finish(result)
    }

    pub fn pick(&mut self, player: u8, row: u8, col: u8) -> u8 {
        let result = player_from_code(player)
            .and_then(|player| self.inner.pick(player, row as usize, col as usize));
        self.finish(result)
    }

    /// Move the picked piece one step, or into the goal.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, direction: u8) -> u8 {
        let result = direction_from_code(direction)
            .and_then(|direction| self.inner.move_piece(direction).map(|_| ()));
        self.finish(result)
    }

    pub fn swap(&mut self, row: u8, col: u8) -> u8 {
        let result = self.inner.swap(row as usize, col as usize);
        self.finish(result)
    }

    #[wasm_bindgen(js_name = cancelStep)]
    pub fn cancel_step(&mut self) -> u8 {
        let result = self.inner.cancel_step();
        self.finish(result)
    }

    #[wasm_bindgen(js_name = cancelMovement)]
    pub fn cancel_movement(&mut self) -> u8 {
        let result = self.inner.cancel_movement();
        self.finish(result)
    }

    /// Message for the most recent failed command, if the last command failed.
    #[wasm_bindgen(js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.map(|err| err.to_string())
    }

    // ========== Queries ==========

    /// Size at (row, col): 0 for empty or off-board cells
    pub fn cell(&self, row: u8, col: u8) -> u8 {
        size_code(self.inner.piece_size(row as usize, col as usize))
    }

    /// Pieces of `size` the player may still place (0 for invalid codes)
    pub fn placeable(&self, size: u8, player: u8) -> u8 {
        match (size_from_code(size), player_from_code(player)) {
            (Ok(size), Ok(player)) => self.inner.placeable(size, player),
            _ => 0,
        }
    }

    #[wasm_bindgen(js_name = setupComplete)]
    pub fn setup_complete(&self) -> bool {
        self.inner.setup_complete()
    }

    /// Frontier row for a player, or -1 when the board is empty
    #[wasm_bindgen(js_name = frontierRow)]
    pub fn frontier_row(&self, player: u8) -> i8 {
        player_from_code(player)
            .ok()
            .and_then(|player| self.inner.frontier_row(player))
            .map_or(-1, |row| row as i8)
    }

    #[wasm_bindgen(js_name = pickedOwner)]
    pub fn picked_owner(&self) -> u8 {
        player_code(self.inner.picked_owner())
    }

    #[wasm_bindgen(js_name = pickedSize)]
    pub fn picked_size(&self) -> u8 {
        size_code(self.inner.picked_size())
    }

    /// Picked piece position as [row, col]; empty when nothing is picked
    #[wasm_bindgen(js_name = pickedPos)]
    pub fn picked_pos(&self) -> Vec<u8> {
        self.inner
            .picked_pos()
            .map(|pos| vec![pos.row() as u8, pos.col() as u8])
            .unwrap_or_default()
    }

    /// Remaining steps, or -1 when nothing is picked
    #[wasm_bindgen(js_name = movementLeft)]
    pub fn movement_left(&self) -> i8 {
        self.inner.movement_left().map_or(-1, |moves| moves as i8)
    }

    /// Winner: 0 (none), 1 (South), or 2 (North)
    pub fn winner(&self) -> u8 {
        player_code(self.inner.winner())
    }

    #[wasm_bindgen(js_name = isMovePossible)]
    pub fn is_move_possible(&self, direction: u8) -> bool {
        direction_from_code(direction)
            .map(|direction| self.inner.is_move_possible(direction))
            .unwrap_or(false)
    }

    /// Direction codes accepted by `movePiece`
    #[wasm_bindgen(js_name = legalDirections)]
    pub fn legal_directions(&self) -> Vec<u8> {
        self.inner.legal_directions().into_iter().map(direction_code).collect()
    }

    /// Legal picks as an array of [row, col]
    pub fn pickable(&self, player: u8) -> Result<JsValue, JsError> {
        let cells: Vec<[u8; 2]> = match player_from_code(player) {
            Ok(player) => self.inner.pickable(player).into_iter().map(cell_of).collect(),
            Err(_) => Vec::new(),
        };
        Ok(serde_wasm_bindgen::to_value(&cells)?)
    }

    /// Whole state as a plain object, for rendering in one call
    pub fn state(&self) -> Result<JsValue, JsError> {
        let state = GameState::from(&self.inner);
        Ok(serde_wasm_bindgen::to_value(&state)?)
    }

    /// Independent copy of the game
    pub fn copy(&self) -> WasmGame {
        WasmGame { inner: self.inner.snapshot(), last_error: self.last_error }
    }
}

impl WasmGame {
    /// Record the outcome of a command and turn it into its code.
    fn finish(&mut self, result: EngineResult<()>) -> u8 {
        let code = ReturnCode::from(&result);
        self.last_error = result.err();
        code as u8
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_of(pos: Pos) -> [u8; 2] {
    [pos.row() as u8, pos.col() as u8]
}

/// Serializable snapshot for JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameState {
    /// Row-major sizes, row 0 first
    cells: Vec<u8>,
    /// placeable[player - 1][size - 1]
    placeable: [[u8; 3]; 2],
    picked: Option<PickedState>,
    movement_left: i8,
    winner: u8,
}

#[derive(Serialize)]
struct PickedState {
    owner: u8,
    size: u8,
    pos: [u8; 2],
    origin: [u8; 2],
}

impl From<&Board> for GameState {
    fn from(board: &Board) -> Self {
        let cells = (0..DIMENSION)
            .flat_map(|row| (0..DIMENSION).map(move |col| (row, col)))
            .map(|(row, col)| size_code(board.piece_size(row, col)))
            .collect();
        let mut placeable = [[0; 3]; 2];
        for (p, player) in Player::all().enumerate() {
            for (s, size) in Size::all().enumerate() {
                placeable[p][s] = board.placeable(size, player);
            }
        }
        GameState {
            cells,
            placeable,
            picked: board.picked().map(|picked| PickedState {
                owner: picked.owner as u8,
                size: picked.size.steps(),
                pos: cell_of(picked.pos),
                origin: cell_of(picked.origin),
            }),
            movement_left: board.movement_left().map_or(-1, |moves| moves as i8),
            winner: player_code(board.winner()),
        }
    }
}
