//! Maps world coordinates into the tiles of the game board: 8 columns of 10 world units each,
//! with the top-left tile centered at (20.5, 90).
//!
//! Tie-breaking follows round-half-to-even: `y` values ending in 5 fall exactly in between two rows.
//! Columns are not clamped to the board width, so tiles alias across rows outside of it: inside the
//! map area `0..=100 x 0..=100`, [EAST_BASE_TILE] & [WEST_BASE_TILE] are reachable only from their own
//! base areas, but coordinates off the map may reach them too -- like `(131, 20)` or `(151, 10)`
//! (see the tests bellow).

/// Tiles per board row
pub const BOARD_COLUMNS: i32 = 8;
/// World units covered by a tile, in each axis
pub const TILE_SIZE: f64 = 10.0;
/// World `x` of the first column's center
pub const ORIGIN_X: f64 = 20.5;
/// World `y` of the first row's center -- rows grow downwards
pub const ORIGIN_Y: f64 = 90.0;

/// The tile of the East team's base core: losing it means East lost the match
pub const EAST_BASE_TILE: i32 = 67;
/// The tile of the West team's base core: losing it means West lost the match
pub const WEST_BASE_TILE: i32 = 77;


/// Returns the board tile for the world coordinates `x`, `y`: `column + row * 8`
pub fn board_position(x: f64, y: f64) -> i32 {
    let column = ((x - ORIGIN_X) / TILE_SIZE).round_ties_even();
    let row = ((ORIGIN_Y - y) / TILE_SIZE).round_ties_even();
    column as i32 + row as i32 * BOARD_COLUMNS
}
