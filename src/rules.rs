//! Rule variants the engine can be configured with.
//!
//! `Rules::STANDARD` is what `Board::new` uses. The other presets reproduce
//! behaviour found in older versions of the game and exist so a front end can
//! offer them as house rules.

use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult, DIMENSION, INITIAL_PIECES};

/// How the frontier row a player must pick from is computed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierRule {
    /// Nearest occupied row to the player's own edge, counting every piece.
    #[default]
    Occupancy,
    /// Nearest row to the player's own edge holding a piece that can move.
    Mobility,
}

/// What a cardinal `move` does while the picked piece hovers with no budget left.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Recharge the budget from the piece underneath and stay put; the next
    /// `move` chooses the direction.
    #[default]
    RechargeThenWait,
    /// Recharge and immediately take one step in the requested direction.
    RechargeAndStep,
}

/// Engine configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Pieces of each size a player places during setup.
    pub initial_pieces: u8,
    pub frontier: FrontierRule,
    pub bounce: BounceMode,
}

impl Rules {
    /// Standard rules.
    pub const STANDARD: Rules = Rules {
        initial_pieces: INITIAL_PIECES,
        frontier: FrontierRule::Occupancy,
        bounce: BounceMode::RechargeThenWait,
    };

    /// Bounces move immediately after recharging.
    pub const IMMEDIATE_BOUNCE: Rules = Rules {
        initial_pieces: INITIAL_PIECES,
        frontier: FrontierRule::Occupancy,
        bounce: BounceMode::RechargeAndStep,
    };

    /// Frontier rows skip rows whose pieces are all blocked.
    pub const MOBILE_FRONTIER: Rules = Rules {
        initial_pieces: INITIAL_PIECES,
        frontier: FrontierRule::Mobility,
        bounce: BounceMode::RechargeThenWait,
    };

    /// Check that the rules describe a playable setup.
    ///
    /// Every piece a player owns starts on that player's home row, so the
    /// quota for all three sizes together must fit in one row.
    pub fn validate(&self) -> EngineResult<()> {
        if self.initial_pieces == 0 {
            return Err(EngineError::InvalidRules { reason: "initial_pieces must be at least 1" });
        }
        if self.initial_pieces as usize * 3 > DIMENSION {
            return Err(EngineError::InvalidRules {
                reason: "initial pieces of all sizes must fit on one row",
            });
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::STANDARD
    }
}
