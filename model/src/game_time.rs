//! Resting place for [GameTime]

use std::fmt::{Display, Formatter};


/// Game loops per second of simulation
pub const LOOPS_PER_SECOND: u64 = 16;
/// The "Faster" game speed multiplier, as the fraction `14/10`
const SPEED_NUMERATOR: u64 = 14;
const SPEED_DENOMINATOR: u64 = 10;

/// Real time elapsed since the match started, with a resolution of 1/10000 of a second.\
/// Used for diagnostics only: no game logic depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct GameTime {
    ten_thousandths: u64,
}

impl GameTime {

    /// `game_loop / 16 / 1.4`, rounded to 4 fractional digits (half to even)
    pub fn from_game_loop(game_loop: u32) -> Self {
        // seconds * 10^4 = game_loop * 10^4 * 10 / (16 * 14)
        let numerator = game_loop as u64 * 10_000 * SPEED_DENOMINATOR;
        let denominator = LOOPS_PER_SECOND * SPEED_NUMERATOR;
        let (quotient, remainder) = (numerator / denominator, numerator % denominator);
        let ten_thousandths = match (remainder * 2).cmp(&denominator) {
            std::cmp::Ordering::Less    => quotient,
            std::cmp::Ordering::Greater => quotient + 1,
            std::cmp::Ordering::Equal   => quotient + (quotient % 2),
        };
        Self { ten_thousandths }
    }

    /// Renders as `H:MM:SS`, followed by `.ffffff` microseconds when there is a fractional part
    pub fn formatted(&self) -> String {
        let seconds = self.ten_thousandths / 10_000;
        let micros = (self.ten_thousandths % 10_000) * 100;
        let (hours, minutes, seconds) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
        if micros == 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
        }
    }
}

impl Display for GameTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:04}", self.ten_thousandths / 10_000, self.ten_thousandths % 10_000)
    }
}
