//! Carnivore attack eligibility.
//!
//! A carnivore may attack any other board unless one of six defenses
//! applies. Defenses look at the defender, its neighbors on its own
//! player's row, and the attacker's own traits.

use serde::{Deserialize, Serialize};

use crate::cards::TraitName;
use crate::species::{BoardRef, SpeciesBoard, SpeciesList};

/// Hard-shell holds unless the attack outsizes the defender by this much.
pub const HARD_SHELL_MARGIN: u32 = 4;

/// The defense that stops an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defense {
    /// Defender climbs, attacker does not.
    Climbing,
    /// Attack size is less than 4 above the defender's body.
    HardShell,
    /// Defender burrows and is fully fed.
    Burrowing,
    /// Defender's population is at least the attacker's.
    Herding,
    /// A neighbor of the defender sounds a warning and the attacker has no ambush.
    WarningCall,
    /// Defender's right neighbor is bigger than the defender.
    Symbiosis,
}

/// Body size an attacker brings: body, plus population with pack-hunting.
#[must_use]
pub fn attack_size(attacker: &SpeciesBoard) -> u32 {
    if attacker.has_trait(TraitName::PackHunting) {
        attacker.body() + attacker.population()
    } else {
        attacker.body()
    }
}

/// First defense that blocks `attacker` from `defender`, if any.
///
/// Only defenses are checked here. Whether the attacker is a carnivore at
/// all is [`can_attack`]'s concern.
#[must_use]
pub fn blocking_defense(
    attacker: &SpeciesBoard,
    defender: &SpeciesBoard,
    left: Option<&SpeciesBoard>,
    right: Option<&SpeciesBoard>,
) -> Option<Defense> {
    let neighbor_warns = |n: Option<&SpeciesBoard>| n.is_some_and(|b| b.has_trait(TraitName::WarningCall));

    if defender.has_trait(TraitName::Climbing) && !attacker.has_trait(TraitName::Climbing) {
        return Some(Defense::Climbing);
    }
    if defender.has_trait(TraitName::HardShell)
        && attack_size(attacker) < defender.body() + HARD_SHELL_MARGIN
    {
        return Some(Defense::HardShell);
    }
    if defender.has_trait(TraitName::Burrowing) && defender.food() == defender.population() {
        return Some(Defense::Burrowing);
    }
    if defender.has_trait(TraitName::Herding) && defender.population() >= attacker.population() {
        return Some(Defense::Herding);
    }
    if (neighbor_warns(left) || neighbor_warns(right)) && !attacker.has_trait(TraitName::Ambush) {
        return Some(Defense::WarningCall);
    }
    if defender.has_trait(TraitName::Symbiosis) && right.is_some_and(|r| r.body() > defender.body()) {
        return Some(Defense::Symbiosis);
    }
    None
}

/// Whether `attacker` may attack `defender` given the defender's neighbors.
///
/// A board never attacks itself and a vegetarian never attacks.
#[must_use]
pub fn can_attack(
    attacker: &SpeciesBoard,
    defender: &SpeciesBoard,
    left: Option<&SpeciesBoard>,
    right: Option<&SpeciesBoard>,
) -> bool {
    if std::ptr::eq(attacker, defender) || attacker.is_vegetarian() {
        return false;
    }
    blocking_defense(attacker, defender, left, right).is_none()
}

/// Every board in `lists` that `attacker` may attack, addressed by list index.
#[must_use]
pub fn attackable_targets(attacker: &SpeciesBoard, lists: &[SpeciesList]) -> Vec<BoardRef> {
    lists
        .iter()
        .enumerate()
        .flat_map(|(owner, list)| {
            (0..list.len())
                .filter(move |&idx| {
                    can_attack(attacker, &list[idx], list.left_neighbor(idx), list.right_neighbor(idx))
                })
                .map(move |idx| BoardRef::new(owner, idx))
        })
        .collect()
}
