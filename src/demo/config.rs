//! Configuration for the demo and stress runs

use clap::ArgMatches;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Unknown ids are tolerated since each subcommand defines a different subset
fn arg<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}

/// Code parameters shared by the example and stress runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Binary field modulus, x^8 + x^4 + x^3 + x^2 + 1 by default
    pub modulus: u32,
    /// Generator of the field's multiplicative group
    pub generator: u32,
    pub message_len: usize,
    pub ecc_len: usize,
    /// Fixed RNG seed (None = seed from OS entropy)
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            modulus: 0x11D,
            generator: 0x02,
            message_len: 8,
            ecc_len: 5,
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn new(modulus: u32, generator: u32, message_len: usize, ecc_len: usize) -> Self {
        Self {
            modulus,
            generator,
            message_len,
            ecc_len,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_args(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            modulus: arg(matches, "modulus").unwrap_or(defaults.modulus),
            generator: arg(matches, "generator").unwrap_or(defaults.generator),
            message_len: arg(matches, "message-len").unwrap_or(defaults.message_len),
            ecc_len: arg(matches, "ecc-len").unwrap_or(defaults.ecc_len),
            seed: arg(matches, "seed"),
        }
    }

    /// Random source for a run: deterministic when a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Configuration for randomized stress rounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressConfig {
    /// Number of random code parameter sets to try
    pub rounds: usize,
    /// Decode attempts per round
    pub trials: usize,
    /// Upper bound on codeword length, further capped by the field size
    pub max_codeword_len: usize,
    /// Number of threads for computation (0 = auto-detect)
    pub threads: usize,
    /// Whether rounds run in parallel
    pub parallel: bool,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            trials: 100,
            max_codeword_len: 255,
            threads: 0,
            parallel: true,
        }
    }
}

impl StressConfig {
    pub fn new(rounds: usize, trials: usize) -> Self {
        Self {
            rounds,
            trials,
            ..Self::default()
        }
    }

    pub fn from_args(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            rounds: arg(matches, "rounds").unwrap_or(defaults.rounds),
            trials: arg(matches, "trials").unwrap_or(defaults.trials),
            max_codeword_len: arg(matches, "max-codeword-len")
                .unwrap_or(defaults.max_codeword_len),
            threads: arg(matches, "threads").unwrap_or(defaults.threads),
            parallel: !arg::<bool>(matches, "no-parallel").unwrap_or(false),
        }
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1,
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            (true, n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.modulus, 0x11D);
        assert_eq!(config.generator, 2);
        assert_eq!((config.message_len, config.ecc_len), (8, 5));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = DemoConfig::default().with_seed(42);
        let a: Vec<u32> = (0..8).map(|_| config.rng().random()).collect();
        let mut rng = config.rng();
        let first: u32 = rng.random();
        assert!(a.iter().all(|&v| v == first));
    }

    #[test]
    fn test_effective_threads() {
        let sequential = StressConfig {
            threads: 8,
            parallel: false,
            ..StressConfig::default()
        };
        assert_eq!(sequential.effective_threads(), 1);

        let fixed = StressConfig {
            threads: 3,
            ..StressConfig::default()
        };
        assert_eq!(fixed.effective_threads(), 3);

        assert!(StressConfig::default().effective_threads() >= 1);

        let short = StressConfig::new(2, 7);
        assert_eq!((short.rounds, short.trials), (2, 7));
        assert!(short.parallel);
    }
}
