//! Generated stand-in names for anonymous authors.
//!
//! A pseudonym is one adjective, one noun and a number below
//! [`PSEUDONYM_NUMBER_RANGE`] glued together with no separator, e.g.
//! `SereneHarbor4821`. It lets an admin tell anonymous entries apart without
//! learning who wrote them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::PSEUDONYM_NUMBER_RANGE;

pub const ADJECTIVES: [&str; 14] = [
    "Luminous",
    "Radiant",
    "Soothing",
    "Gentle",
    "Serene",
    "Mystic",
    "Whispering",
    "Eternal",
    "Sunny",
    "Dancing",
    "Blooming",
    "Dreaming",
    "Hushed",
    "Wandering",
];

pub const NOUNS: [&str; 14] = [
    "Willow",
    "Raven",
    "River",
    "Lotus",
    "Phoenix",
    "Aurora",
    "Meadow",
    "Storm",
    "Sage",
    "Echo",
    "Lantern",
    "Breeze",
    "Crescent",
    "Harbor",
];

/// Generate a pseudonym from the supplied random source.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    // both vocabularies are non-empty constants
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or(ADJECTIVES[0]);
    let noun = NOUNS.choose(rng).copied().unwrap_or(NOUNS[0]);
    let number = rng.gen_range(0..PSEUDONYM_NUMBER_RANGE);
    format!("{adjective}{noun}{number}")
}
