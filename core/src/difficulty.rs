//! Level-number to difficulty mapping.

use serde::{Deserialize, Serialize};

/// Difficulty band keyed by level number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Levels 1 through 20.
    Easy,
    /// Levels 21 through 60.
    Medium,
    /// Levels 61 through 99.
    Hard,
}

impl DifficultyTier {
    /// Resolves the tier for a level number.
    ///
    /// Level numbers below the campaign fall into [`DifficultyTier::Easy`] and
    /// those above it into [`DifficultyTier::Hard`].
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        if level <= TIER_CURVES[0].last_level {
            Self::Easy
        } else if level <= TIER_CURVES[1].last_level {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    /// First and last campaign level covered by the tier.
    #[must_use]
    pub fn level_range(self) -> (u32, u32) {
        let curve = self.curve();
        (curve.first_level, curve.last_level)
    }

    /// Human-readable tier name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    fn curve(self) -> &'static TierCurve {
        match self {
            Self::Easy => &TIER_CURVES[0],
            Self::Medium => &TIER_CURVES[1],
            Self::Hard => &TIER_CURVES[2],
        }
    }
}

/// Generation parameters derived from a level number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelParameters {
    /// Level number the parameters describe.
    pub level: u32,
    /// Difficulty band of the level.
    pub tier: DifficultyTier,
    /// Number of pots placed on the grid.
    pub pots: u32,
    /// Number of obstacles placed in the grid interior.
    pub obstacles: u32,
    /// Talisman budget of the level.
    pub max_talismans: u32,
}

impl LevelParameters {
    /// Evaluates the difficulty curve for a level number.
    ///
    /// Counts the curve would drive negative at out-of-range level numbers
    /// saturate at zero.
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        let tier = DifficultyTier::for_level(level);
        let curve = tier.curve();
        let offset = i64::from(level) - i64::from(curve.anchor);

        let pots = curve.min_pots.max(curve.base_pots - decay(offset, curve.pot_step));
        let obstacles = curve.base_obstacles - decay(offset, curve.obstacle_step);
        let max_talismans = curve.base_talismans + offset * curve.talisman_tenths_per_level / 10;

        Self {
            level,
            tier,
            pots: saturate(pots),
            obstacles: saturate(obstacles),
            max_talismans: saturate(max_talismans),
        }
    }
}

/// Linear difficulty curve of a single tier.
///
/// `offset` is the level number minus `anchor`. Pot and obstacle counts drop by
/// one every `step` levels of offset (a step of zero keeps them flat) and the
/// talisman budget grows by `talisman_tenths_per_level / 10` per level.
#[derive(Debug)]
struct TierCurve {
    first_level: u32,
    last_level: u32,
    anchor: u32,
    base_pots: i64,
    min_pots: i64,
    pot_step: i64,
    base_obstacles: i64,
    obstacle_step: i64,
    base_talismans: i64,
    talisman_tenths_per_level: i64,
}

static TIER_CURVES: [TierCurve; 3] = [
    TierCurve {
        first_level: 1,
        last_level: 20,
        anchor: 0,
        base_pots: 5,
        min_pots: 3,
        pot_step: 5,
        base_obstacles: 8,
        obstacle_step: 3,
        base_talismans: 20,
        talisman_tenths_per_level: 20,
    },
    TierCurve {
        first_level: 21,
        last_level: 60,
        anchor: 20,
        base_pots: 4,
        min_pots: 2,
        pot_step: 10,
        base_obstacles: 5,
        obstacle_step: 15,
        base_talismans: 25,
        talisman_tenths_per_level: 15,
    },
    TierCurve {
        first_level: 61,
        last_level: 99,
        anchor: 60,
        base_pots: 1,
        min_pots: 1,
        pot_step: 0,
        base_obstacles: 2,
        obstacle_step: 20,
        base_talismans: 30,
        talisman_tenths_per_level: 12,
    },
];

fn decay(offset: i64, step: i64) -> i64 {
    if step == 0 {
        0
    } else {
        offset.div_euclid(step)
    }
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
