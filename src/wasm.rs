//! WASM bindings for reversi-core.
//!
//! Provides a JavaScript-friendly API for the board logic. Arguments come
//! in as loose [`JsValue`]s so that the original error kinds survive the
//! boundary: a string or null player is rejected as an invalid player, a
//! string or fractional coordinate as a coordinate type violation.

use wasm_bindgen::prelude::*;

use crate::{Board, BoardError, Player, Square};

fn js_err(err: BoardError) -> JsError {
    JsError::new(&err.to_string())
}

/// Parse a loose player argument. Anything that is not exactly the
/// number 1 or 2 is an invalid player, matching the strict check of the
/// original API.
fn player_arg(value: &JsValue) -> Result<Player, JsError> {
    match value.as_f64() {
        Some(v) if v.is_finite() && v.fract() == 0.0 => {
            Player::try_from(v as i64).map_err(js_err)
        }
        _ => Err(JsError::new("player must be 1 or 2")),
    }
}

/// Parse loose coordinate arguments: non-numeric values are a type
/// violation, the rest goes through the core float validation.
fn square_arg(row: &JsValue, col: &JsValue) -> Result<Square, JsError> {
    let row = row
        .as_f64()
        .ok_or_else(|| js_err(BoardError::NonIntegerCoordinate))?;
    let col = col
        .as_f64()
        .ok_or_else(|| js_err(BoardError::NonIntegerCoordinate))?;
    Square::from_f64(row, col).map_err(js_err)
}

/// WASM-friendly wrapper around Board.
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a board in the standard opening position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard { inner: Board::new() }
    }

    /// Build a board from an 8x8 array-of-arrays of cell values (0/1/2).
    pub fn of(grid: JsValue) -> Result<WasmBoard, JsError> {
        let rows: Vec<Vec<u8>> =
            serde_wasm_bindgen::from_value(grid).map_err(|_| js_err(BoardError::InvalidGrid))?;
        let inner = Board::of(&rows).map_err(js_err)?;
        Ok(WasmBoard { inner })
    }

    /// Check whether the player may place a disc at (row, col).
    #[wasm_bindgen(js_name = isValidMove)]
    pub fn is_valid_move(
        &self,
        player: JsValue,
        row: JsValue,
        col: JsValue,
    ) -> Result<bool, JsError> {
        let player = player_arg(&player)?;
        let sq = square_arg(&row, &col)?;
        Ok(self.inner.is_legal(player, sq))
    }

    /// Get all legal placements for the player as an array of [row, col]
    /// pairs.
    #[wasm_bindgen(js_name = validMoves)]
    pub fn valid_moves(&self, player: JsValue) -> Result<JsValue, JsError> {
        let player = player_arg(&player)?;
        let moves: Vec<[u8; 2]> = self
            .inner
            .legal_moves(player)
            .into_iter()
            .map(|sq| [sq.row(), sq.col()])
            .collect();
        serde_wasm_bindgen::to_value(&moves).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Apply a move, flipping captured discs. Returns the flip count.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(
        &mut self,
        player: JsValue,
        row: JsValue,
        col: JsValue,
    ) -> Result<u8, JsError> {
        let player = player_arg(&player)?;
        let sq = square_arg(&row, &col)?;
        self.inner
            .apply_move(player as i64, sq.row() as i64, sq.col() as i64)
            .map_err(js_err)
    }

    /// Current score and terminal status as
    /// `{ finished, playerOne, playerTwo, tied, winner }`.
    pub fn result(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.result()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The grid flattened row-major as 64 cell values (0/1/2), for
    /// rendering by the host page.
    pub fn cells(&self) -> Vec<u8> {
        Square::all().map(|sq| self.inner.cell(sq) as u8).collect()
    }

    /// ASCII rendering of the board (8 lines).
    pub fn render(&self) -> String {
        self.inner.to_string()
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}
