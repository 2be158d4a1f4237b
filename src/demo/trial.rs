//! Example, trial and stress drivers

use super::{DemoConfig, DemoError, DemoResult, StressConfig};
use crate::field::BinaryField;
use crate::reed_solomon::ReedSolomon;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fmt;

/// Tally of decode outcomes over a batch of trials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialStats {
    /// Decoded message matched the original
    pub success: u64,
    /// Decoder returned a message that differs from the original
    pub wrong: u64,
    /// Decoder gave up
    pub failure: u64,
}

impl TrialStats {
    pub fn total(&self) -> u64 {
        self.success + self.wrong + self.failure
    }
}

/// One encode, corrupt, decode cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleReport {
    pub message: Vec<u32>,
    pub codeword: Vec<u32>,
    pub received: Vec<u32>,
    /// Codeword indexes that were changed, ascending
    pub error_positions: Vec<usize>,
    pub decoded: Option<Vec<u32>>,
}

impl ExampleReport {
    pub fn is_recovered(&self) -> bool {
        self.decoded.as_deref() == Some(self.message.as_slice())
    }
}

impl fmt::Display for ExampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original message: {:?}", self.message)?;
        writeln!(f, "Encoded codeword: {:?}", self.codeword)?;
        writeln!(f, "Received codeword: {:?}", self.received)?;
        writeln!(
            f,
            "Values perturbed: {} at {:?}",
            self.error_positions.len(),
            self.error_positions
        )?;
        match &self.decoded {
            Some(decoded) => {
                writeln!(f, "Decoded message: {:?}", decoded)?;
                let verdict = if self.is_recovered() { "correct" } else { "wrong" };
                write!(f, "Decoding {}", verdict)
            }
            None => write!(f, "Decoding failed"),
        }
    }
}

/// Outcome of one stress round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub message_len: usize,
    pub ecc_len: usize,
    pub num_errors: usize,
    pub stats: TrialStats,
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message_len={:3} ecc_len={:3} codeword_len={:3} errors={:3} | trials={} success={} wrong={} failure={}",
            self.message_len,
            self.ecc_len,
            self.message_len + self.ecc_len,
            self.num_errors,
            self.stats.total(),
            self.stats.success,
            self.stats.wrong,
            self.stats.failure
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct RoundParams {
    message_len: usize,
    ecc_len: usize,
    num_errors: usize,
    seed: u64,
}

// XOR with a non-zero value always changes the element; size >= 2
#[inline]
fn perturb<R: Rng>(value: u32, size: u32, rng: &mut R) -> u32 {
    value ^ rng.random_range(1..size)
}

fn random_message<R: Rng>(len: usize, size: u32, rng: &mut R) -> Vec<u32> {
    (0..len).map(|_| rng.random_range(0..size)).collect()
}

/// Encodes a random message, perturbs it, and decodes it
///
/// Each codeword value is perturbed independently with probability
/// `(ecc_len / 2) / codeword_len`, so on average the error count sits at the
/// correction budget.
pub fn show_example<R: Rng>(config: &DemoConfig, rng: &mut R) -> DemoResult<ExampleReport> {
    let field = BinaryField::new(config.modulus)?;
    let rs = ReedSolomon::new(field, config.generator, config.message_len, config.ecc_len)?;
    let size = field.size();

    let message = random_message(rs.message_len(), size, rng);
    let codeword = rs.encode(&message)?;

    let probability = rs.max_correctable() as f64 / rs.codeword_len() as f64;
    let mut received = codeword.clone();
    let mut error_positions = Vec::new();
    for (i, value) in received.iter_mut().enumerate() {
        if rng.random::<f64>() < probability {
            *value = perturb(*value, size, rng);
            error_positions.push(i);
        }
    }

    let decoded = rs.decode(&received)?;
    debug!(
        "Example: {} values perturbed, decode {}",
        error_positions.len(),
        if decoded.is_some() { "produced a message" } else { "failed" }
    );

    Ok(ExampleReport {
        message,
        codeword,
        received,
        error_positions,
        decoded,
    })
}

/// Runs `trials` decode attempts with exactly `num_errors` perturbed values each
///
/// Positions are drawn without replacement by a partial Fisher-Yates shuffle.
/// Returns [`DemoError::GuaranteeViolated`] as soon as a decode within the
/// correction budget comes back wrong or failed.
pub fn run_trials<R: Rng>(
    rs: &ReedSolomon<BinaryField>,
    num_errors: usize,
    trials: usize,
    rng: &mut R,
) -> DemoResult<TrialStats> {
    let codeword_len = rs.codeword_len();
    if num_errors > codeword_len {
        return Err(DemoError::TooManyErrors {
            num_errors,
            codeword_len,
        });
    }
    let size = rs.field().size();
    let guaranteed = num_errors <= rs.max_correctable();

    let mut stats = TrialStats::default();
    let mut indexes: Vec<usize> = (0..codeword_len).collect();
    for _ in 0..trials {
        let message = random_message(rs.message_len(), size, rng);
        let mut codeword = rs.encode(&message)?;

        for i in 0..num_errors {
            let j = rng.random_range(i..codeword_len);
            indexes.swap(i, j);
            let pos = indexes[i];
            codeword[pos] = perturb(codeword[pos], size, rng);
        }

        match rs.decode(&codeword)? {
            Some(decoded) if decoded == message => stats.success += 1,
            Some(_) => stats.wrong += 1,
            None => stats.failure += 1,
        }

        if guaranteed && stats.success < stats.total() {
            return Err(DemoError::GuaranteeViolated {
                message_len: rs.message_len(),
                ecc_len: rs.ecc_len(),
                num_errors,
            });
        }
    }
    Ok(stats)
}

fn random_round<R: Rng>(limit: usize, rng: &mut R) -> RoundParams {
    loop {
        let message_len = rng.random_range(1..=limit);
        let ecc_len = rng.random_range(1..=limit);
        let codeword_len = message_len + ecc_len;
        if codeword_len <= limit {
            return RoundParams {
                message_len,
                ecc_len,
                num_errors: rng.random_range(0..=codeword_len),
                seed: rng.random(),
            };
        }
    }
}

fn run_round(
    field: BinaryField,
    generator: u32,
    params: &RoundParams,
    trials: usize,
) -> DemoResult<RoundReport> {
    let rs = ReedSolomon::new(field, generator, params.message_len, params.ecc_len)?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let stats = run_trials(&rs, params.num_errors, trials, &mut rng)?;
    let report = RoundReport {
        message_len: params.message_len,
        ecc_len: params.ecc_len,
        num_errors: params.num_errors,
        stats,
    };
    debug!("Round done: {}", report);
    Ok(report)
}

/// Runs randomized rounds over the configured field
///
/// Round parameters are drawn up front from the configured RNG and each round
/// gets its own seeded RNG, so a seeded run reports the same results
/// regardless of thread count. Codeword length is capped at both the field's
/// multiplicative group order and `max_codeword_len`.
pub fn stress(demo: &DemoConfig, config: &StressConfig) -> DemoResult<Vec<RoundReport>> {
    let field = BinaryField::new(demo.modulus)?;
    let limit = (field.size() as usize - 1).min(config.max_codeword_len);
    if limit < 2 {
        return Err(DemoError::FieldTooSmall {
            size: field.size(),
            limit,
        });
    }

    let mut rng = demo.rng();
    let rounds: Vec<RoundParams> = (0..config.rounds)
        .map(|_| random_round(limit, &mut rng))
        .collect();

    let threads = config.effective_threads();
    info!(
        "Running {} rounds of {} trials over GF(2^{}) on {} thread(s)",
        config.rounds,
        config.trials,
        field.degree(),
        threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    pool.install(|| {
        rounds
            .par_iter()
            .map(|params| run_round(field, demo.generator, params, config.trials))
            .collect()
    })
}
