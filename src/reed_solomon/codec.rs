//! Reed-Solomon encoder and syndrome decoder over any [`Field`]
//!
//! ## Codeword Layout
//!
//! A codeword is `[ecc_len ECC values][message_len message values]`. Read as a
//! little endian polynomial, every valid codeword evaluates to zero at each of
//! `generator^0 .. generator^(ecc_len-1)`.
//!
//! ## Decoding Pipeline
//!
//! 1. Syndromes: evaluate the codeword at the generator powers
//! 2. Error locator: solve a `k x (k+1)` system built from syndrome windows
//! 3. Error locations: brute-force roots of the locator at `generator^-i`
//! 4. Error values: solve a Vandermonde-style system for the magnitudes
//! 5. Correction: subtract the magnitudes and re-check the syndromes
//!
//! Both linear systems are solved with [`Matrix::reduced_row_echelon_form`];
//! the codec itself never does raw arithmetic outside the field.

use super::error::{DecodeFailure, RsError, RsResult};
use super::polynomial::{evaluate, generator_polynomial};
use crate::field::{all_zero, Field, FieldError};
use crate::matrix::{Matrix, MatrixError};
use log::{debug, trace};

/// Result of a detailed decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome<E> {
    /// All syndromes were zero; the message is taken as-is
    Clean(Vec<E>),
    /// Errors were located and repaired at the given codeword indexes
    Corrected {
        message: Vec<E>,
        error_positions: Vec<usize>,
    },
    /// No answer could be produced
    Failed(DecodeFailure),
}

impl<E> DecodeOutcome<E> {
    pub fn message(&self) -> Option<&[E]> {
        match self {
            DecodeOutcome::Clean(message) | DecodeOutcome::Corrected { message, .. } => {
                Some(message)
            }
            DecodeOutcome::Failed(_) => None,
        }
    }

    pub fn into_message(self) -> Option<Vec<E>> {
        match self {
            DecodeOutcome::Clean(message) | DecodeOutcome::Corrected { message, .. } => {
                Some(message)
            }
            DecodeOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DecodeOutcome::Failed(_))
    }
}

// Early exit from the correction stages: either a soft failure or a hard error
enum Halt {
    Failed(DecodeFailure),
    Error(RsError),
}

impl From<DecodeFailure> for Halt {
    fn from(failure: DecodeFailure) -> Self {
        Halt::Failed(failure)
    }
}

impl From<RsError> for Halt {
    fn from(err: RsError) -> Self {
        Halt::Error(err)
    }
}

impl From<FieldError> for Halt {
    fn from(err: FieldError) -> Self {
        Halt::Error(err.into())
    }
}

impl From<MatrixError> for Halt {
    fn from(err: MatrixError) -> Self {
        Halt::Error(err.into())
    }
}

/// Reed-Solomon encoder/decoder bound to a field, a generator and fixed lengths
///
/// Immutable after construction; every encode/decode call is independent, so a
/// single codec can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReedSolomon<F: Field> {
    field: F,
    generator: F::Elem,
    message_len: usize,
    ecc_len: usize,
    codeword_len: usize,
    // Monic generator polynomial without its leading coefficient
    generator_poly: Vec<F::Elem>,
}

impl<F: Field> ReedSolomon<F> {
    /// Creates a codec for `message_len` values expanded by `ecc_len` ECC values
    ///
    /// `generator` must generate the multiplicative group of `field`. That is
    /// trusted, not checked; only membership in the field is validated.
    pub fn new(
        field: F,
        generator: F::Elem,
        message_len: usize,
        ecc_len: usize,
    ) -> RsResult<Self> {
        if message_len == 0 || ecc_len == 0 {
            return Err(RsError::InvalidLengths {
                message_len,
                ecc_len,
            });
        }
        let codeword_len = message_len
            .checked_add(ecc_len)
            .ok_or(RsError::InvalidLengths {
                message_len,
                ecc_len,
            })?;
        field.validate(&generator)?;

        let generator_poly = generator_polynomial(&field, &generator, ecc_len)?;
        Ok(Self {
            field,
            generator,
            message_len,
            ecc_len,
            codeword_len,
            generator_poly,
        })
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn generator(&self) -> &F::Elem {
        &self.generator
    }

    #[inline]
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    #[inline]
    pub fn ecc_len(&self) -> usize {
        self.ecc_len
    }

    #[inline]
    pub fn codeword_len(&self) -> usize {
        self.codeword_len
    }

    /// Number of errors the default decode is guaranteed to correct
    #[inline]
    pub fn max_correctable(&self) -> usize {
        self.ecc_len / 2
    }

    /// Generator polynomial coefficients, little endian, without the x^ecc_len term
    pub fn generator_polynomial(&self) -> &[F::Elem] {
        &self.generator_poly
    }

    /// Encodes a message into a new codeword (ECC values followed by the message)
    pub fn encode(&self, message: &[F::Elem]) -> RsResult<Vec<F::Elem>> {
        if message.len() != self.message_len {
            return Err(RsError::MessageLength {
                expected: self.message_len,
                actual: message.len(),
            });
        }

        let f = &self.field;
        let ecc_len = self.ecc_len;

        // Remainder of message(x) * x^ecc_len divided by the generator polynomial,
        // consuming message coefficients from the highest power down
        let mut ecc = vec![f.zero(); ecc_len];
        for msg_val in message.iter().rev() {
            let factor = f.add(msg_val, &ecc[ecc_len - 1])?;
            ecc.rotate_right(1);
            ecc[0] = f.zero();
            for (slot, gen_coef) in ecc.iter_mut().zip(&self.generator_poly) {
                let term = f.multiply(gen_coef, &factor)?;
                *slot = f.subtract(slot, &term)?;
            }
        }

        let mut codeword = Vec::with_capacity(self.codeword_len);
        for val in &ecc {
            codeword.push(f.negate(val)?);
        }
        codeword.extend_from_slice(message);
        Ok(codeword)
    }

    /// Decodes with the maximum guaranteed correction capability, `ecc_len / 2`
    ///
    /// Returns `Ok(None)` when the codeword cannot be decoded. With at most
    /// `ecc_len / 2` corrupted values the answer is always correct; beyond that
    /// a failure is most likely, but a wrong message is possible.
    pub fn decode(&self, codeword: &[F::Elem]) -> RsResult<Option<Vec<F::Elem>>> {
        self.decode_with(codeword, self.max_correctable())
    }

    /// Decodes, trying to correct at most `num_errors_to_correct` values
    pub fn decode_with(
        &self,
        codeword: &[F::Elem],
        num_errors_to_correct: usize,
    ) -> RsResult<Option<Vec<F::Elem>>> {
        Ok(self
            .decode_detailed(codeword, num_errors_to_correct)?
            .into_message())
    }

    /// Decodes and reports how the result was reached
    ///
    /// `num_errors_to_correct` must lie in `0..=ecc_len / 2`; zero only detects.
    pub fn decode_detailed(
        &self,
        codeword: &[F::Elem],
        num_errors_to_correct: usize,
    ) -> RsResult<DecodeOutcome<F::Elem>> {
        self.check_codeword(codeword)?;
        if num_errors_to_correct > self.max_correctable() {
            return Err(RsError::CorrectionBudget {
                requested: num_errors_to_correct,
                max: self.max_correctable(),
            });
        }

        let syndromes = self.syndromes(codeword)?;
        if all_zero(&self.field, &syndromes)? {
            return Ok(DecodeOutcome::Clean(codeword[self.ecc_len..].to_vec()));
        }
        trace!("non-zero syndromes: {:?}", syndromes);

        if num_errors_to_correct == 0 {
            debug!("decode: {}", DecodeFailure::CorrectionDisabled);
            return Ok(DecodeOutcome::Failed(DecodeFailure::CorrectionDisabled));
        }

        match self.correct(codeword, &syndromes, num_errors_to_correct) {
            Ok((corrected, error_positions)) => {
                debug!("decode: corrected positions {:?}", error_positions);
                Ok(DecodeOutcome::Corrected {
                    message: corrected[self.ecc_len..].to_vec(),
                    error_positions,
                })
            }
            Err(Halt::Failed(failure)) => {
                debug!("decode: {}", failure);
                Ok(DecodeOutcome::Failed(failure))
            }
            Err(Halt::Error(err)) => Err(err),
        }
    }

    /// Evaluates the codeword at `generator^0 .. generator^(ecc_len-1)`
    ///
    /// All zeros means no error was detected.
    pub fn syndromes(&self, codeword: &[F::Elem]) -> RsResult<Vec<F::Elem>> {
        self.check_codeword(codeword)?;
        let f = &self.field;
        let mut result = Vec::with_capacity(self.ecc_len);
        let mut gen_pow = f.one();
        for _ in 0..self.ecc_len {
            result.push(evaluate(f, codeword, &gen_pow)?);
            gen_pow = f.multiply(&self.generator, &gen_pow)?;
        }
        Ok(result)
    }

    fn check_codeword(&self, codeword: &[F::Elem]) -> RsResult<()> {
        if codeword.len() != self.codeword_len {
            return Err(RsError::CodewordLength {
                expected: self.codeword_len,
                actual: codeword.len(),
            });
        }
        Ok(())
    }

    // Runs the locator, root search and error value stages, then applies the fix
    fn correct(
        &self,
        codeword: &[F::Elem],
        syndromes: &[F::Elem],
        num_errors_to_correct: usize,
    ) -> Result<(Vec<F::Elem>, Vec<usize>), Halt> {
        let locator = self.error_locator_polynomial(syndromes, num_errors_to_correct)?;
        let error_positions = self.find_error_locations(&locator, num_errors_to_correct)?;
        let error_values = self.error_values(&error_positions, syndromes)?;

        let f = &self.field;
        let mut corrected = codeword.to_vec();
        // Surplus locator roots solve to a zero magnitude and are not reported
        let mut changed = Vec::with_capacity(error_positions.len());
        for (&pos, val) in error_positions.iter().zip(&error_values) {
            if f.is_zero(val)? {
                continue;
            }
            corrected[pos] = f.subtract(&corrected[pos], val)?;
            changed.push(pos);
        }

        // Any solution of the error value system zeroes the syndromes
        let check = self.syndromes(&corrected)?;
        assert!(
            all_zero(f, &check)?,
            "decoder produced a codeword with non-zero syndromes"
        );
        Ok((corrected, changed))
    }

    // Locator coefficients in little endian; the constant term is always one
    fn error_locator_polynomial(
        &self,
        syndromes: &[F::Elem],
        k: usize,
    ) -> Result<Vec<F::Elem>, Halt> {
        let f = &self.field;

        // Augmented system [S_(r+c)] | -S_(r+k)
        let mut matrix = Matrix::new(k, k + 1, f)?;
        for r in 0..k {
            for c in 0..=k {
                let mut val = syndromes[r + c].clone();
                if c == k {
                    val = f.negate(&val)?;
                }
                matrix.set(r, c, val)?;
            }
        }
        matrix.reduced_row_echelon_form()?;

        // Free variables stay zero
        let mut result = vec![f.zero(); k + 1];
        result[0] = f.one();

        let mut c = 0;
        'rows: for r in 0..k {
            loop {
                if c == k + 1 {
                    break 'rows;
                } else if f.is_zero(&matrix.value(r, c)?)? {
                    c += 1;
                } else if c == k {
                    return Err(DecodeFailure::InconsistentLocator.into());
                } else {
                    break;
                }
            }
            result[k - c] = matrix.value(r, k)?;
        }
        Ok(result)
    }

    // Codeword indexes i where locator(generator^-i) == 0
    fn find_error_locations(
        &self,
        locator: &[F::Elem],
        max_solutions: usize,
    ) -> Result<Vec<usize>, Halt> {
        let f = &self.field;
        let gen_rec = f.reciprocal(&self.generator)?;
        let mut gen_rec_pow = f.one();
        let mut found = Vec::with_capacity(max_solutions);

        for i in 0..self.codeword_len {
            let val = evaluate(f, locator, &gen_rec_pow)?;
            if f.is_zero(&val)? {
                if found.len() >= max_solutions {
                    return Err(DecodeFailure::TooManyRoots.into());
                }
                found.push(i);
            }
            gen_rec_pow = f.multiply(&gen_rec, &gen_rec_pow)?;
        }

        if found.is_empty() {
            return Err(DecodeFailure::NoRoots.into());
        }
        Ok(found)
    }

    // Error magnitudes at the given positions, from the syndrome equations
    fn error_values(
        &self,
        error_positions: &[usize],
        syndromes: &[F::Elem],
    ) -> Result<Vec<F::Elem>, Halt> {
        let f = &self.field;
        let rows = syndromes.len();
        let cols = error_positions.len() + 1;

        let mut matrix = Matrix::new(rows, cols, f)?;
        for (c, &pos) in error_positions.iter().enumerate() {
            let gen_pow = f.pow(&self.generator, pos as u64)?;
            let mut gen_pow_pow = f.one();
            for r in 0..rows {
                matrix.set(r, c, gen_pow_pow.clone())?;
                gen_pow_pow = f.multiply(&gen_pow, &gen_pow_pow)?;
            }
        }
        for (r, syndrome) in syndromes.iter().enumerate() {
            matrix.set(r, cols - 1, syndrome.clone())?;
        }

        matrix.reduced_row_echelon_form()?;
        if !f.is_zero(&matrix.value(cols - 1, cols - 1)?)? {
            return Err(DecodeFailure::InconsistentErrorValues.into());
        }

        let one = f.one();
        let mut result = Vec::with_capacity(error_positions.len());
        for i in 0..error_positions.len() {
            if !f.equals(&matrix.value(i, i)?, &one)? {
                return Err(DecodeFailure::UnderdeterminedErrorValues.into());
            }
            result.push(matrix.value(i, cols - 1)?);
        }
        Ok(result)
    }
}
