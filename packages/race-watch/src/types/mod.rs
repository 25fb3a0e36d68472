pub mod change;
pub mod race;
