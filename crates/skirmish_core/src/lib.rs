//! Skirmish gameplay code: map generation, movement ranges, combat and the turn cycle
//!
//! Activate the feature `integration_test` to play full machine against machine
//! games, it's disabled by default as it is slow.

pub mod prelude;

pub mod access;
pub mod actions;
pub mod combat;
pub mod coord;
pub mod effect;
pub mod error;
pub mod game;
pub mod grid;
pub mod item;
pub mod machine;
pub mod mapgen;
pub mod settings;
pub mod skills;
pub mod terrain;
pub mod unit;

#[cfg(test)]
mod test;

/// Used to tell serde to not serialize default fields.
/// In combination with marking fields as default results in serde not serializing default fields
/// and setting as the default value fields if during deserialization the field is not present.
fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    t == &T::default()
}
