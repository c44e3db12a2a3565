//! The sixteen trait names.
//!
//! Variants are declared in the lexicographic order of their text form, so
//! the derived `Ord` matches sorting by name.

use serde::{Deserialize, Serialize};

use crate::core::EvoError;

/// A trait printed on a card and attached to a species board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraitName {
    Ambush,
    Burrowing,
    Carnivore,
    Climbing,
    Cooperation,
    FatTissue,
    Fertile,
    Foraging,
    HardShell,
    Herding,
    Horns,
    LongNeck,
    PackHunting,
    Scavenger,
    Symbiosis,
    WarningCall,
}

impl TraitName {
    /// Every trait name, in text order.
    pub const ALL: [TraitName; 16] = [
        TraitName::Ambush,
        TraitName::Burrowing,
        TraitName::Carnivore,
        TraitName::Climbing,
        TraitName::Cooperation,
        TraitName::FatTissue,
        TraitName::Fertile,
        TraitName::Foraging,
        TraitName::HardShell,
        TraitName::Herding,
        TraitName::Horns,
        TraitName::LongNeck,
        TraitName::PackHunting,
        TraitName::Scavenger,
        TraitName::Symbiosis,
        TraitName::WarningCall,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TraitName::Ambush => "ambush",
            TraitName::Burrowing => "burrowing",
            TraitName::Carnivore => "carnivore",
            TraitName::Climbing => "climbing",
            TraitName::Cooperation => "cooperation",
            TraitName::FatTissue => "fat-tissue",
            TraitName::Fertile => "fertile",
            TraitName::Foraging => "foraging",
            TraitName::HardShell => "hard-shell",
            TraitName::Herding => "herding",
            TraitName::Horns => "horns",
            TraitName::LongNeck => "long-neck",
            TraitName::PackHunting => "pack-hunting",
            TraitName::Scavenger => "scavenger",
            TraitName::Symbiosis => "symbiosis",
            TraitName::WarningCall => "warning-call",
        }
    }

    /// Inclusive food value range printed on cards of this trait.
    #[must_use]
    pub const fn food_range(self) -> (i32, i32) {
        match self {
            TraitName::Carnivore => (-8, 8),
            _ => (-3, 3),
        }
    }
}

impl std::fmt::Display for TraitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TraitName {
    type Err = EvoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EvoError::InvalidCard(format!("unknown trait name {s:?}")))
    }
}
