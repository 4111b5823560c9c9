use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision in the simulation.
pub trait Dice: Send {
    /// Uniform destination floor in `1..=num_floors`.
    fn destination(&mut self, num_floors: u16) -> u16;
    /// Uniform value in `[0, 1)` compared against the call probability.
    fn call_roll(&mut self) -> f64;
    /// Uniform group size in `1..=max`.
    fn group_size(&mut self, max: u8) -> u8;
}

impl<R: Rng + Send> Dice for R {
    fn destination(&mut self, num_floors: u16) -> u16 {
        self.gen_range(1..=num_floors.max(1))
    }

    fn call_roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn group_size(&mut self, max: u8) -> u8 {
        self.gen_range(1..=max.max(1))
    }
}

/// A seeded generator when `seed` is set, otherwise one seeded from entropy.
/// `stream` keeps the per-thread generators of one seeded run apart.
pub fn new_dice(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))),
        None => StdRng::from_entropy(),
    }
}
