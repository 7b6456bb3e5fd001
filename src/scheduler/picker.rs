use crate::model::ShiftPatternId;
use rand::prelude::IndexedRandom;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Choisit un shift parmi les préférences (non vides) d'un employé.
pub trait ShiftPicker {
    fn pick<'a>(&mut self, preferred: &'a [ShiftPatternId]) -> Option<&'a ShiftPatternId>;
}

/// Tirage uniforme.
#[derive(Debug, Clone)]
pub struct RandomPicker<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self::new(rand::rng())
    }
}

impl RandomPicker<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ShiftPicker for RandomPicker<R> {
    fn pick<'a>(&mut self, preferred: &'a [ShiftPatternId]) -> Option<&'a ShiftPatternId> {
        preferred.choose(&mut self.rng)
    }
}

/// Toujours la première préférence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstPreference;

impl ShiftPicker for FirstPreference {
    fn pick<'a>(&mut self, preferred: &'a [ShiftPatternId]) -> Option<&'a ShiftPatternId> {
        preferred.first()
    }
}
