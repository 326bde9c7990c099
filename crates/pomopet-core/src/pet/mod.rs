mod stats;

pub use stats::{PetSettings, PetStats, StatEngine};
