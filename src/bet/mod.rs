//! Dice betting: roll sources, resolution math, and settlement types.

pub mod dice;
pub mod resolution;
pub mod types;
