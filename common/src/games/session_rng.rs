use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws for the simulation. A fixed source makes a game reproducible.
pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Replays a fixed list of draws, cycling when exhausted. Each draw is reduced modulo `bound`.
    pub struct ScriptedRng {
        draws: Vec<usize>,
        position: usize,
        pub calls: usize,
    }

    impl ScriptedRng {
        pub fn new(draws: Vec<usize>) -> Self {
            Self {
                draws,
                position: 0,
                calls: 0,
            }
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_index(&mut self, bound: usize) -> usize {
            self.calls += 1;
            let value = self.draws[self.position % self.draws.len()];
            self.position += 1;
            value % bound
        }
    }
}
