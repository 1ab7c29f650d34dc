//! Random walks over a model.

use rand::Rng;

use super::{model::Hmm, table::ProbRow};
use crate::{
    error::{ConfigurationError, Result},
    sequence::Sequence,
};

/// Weighted choice over `0..len` backed by a cumulative-weight array.
///
/// One uniform draw in `[0, total)` is mapped to the first index whose
/// cumulative weight exceeds it, so zero-weight entries are never picked.
#[derive(Debug, Clone)]
pub struct WeightedChoice {
    cmf: Vec<f64>,
}

impl WeightedChoice {
    /// `None` when there is nothing to choose from or every weight is zero.
    pub fn from_weights<I: IntoIterator<Item = f64>>(weights: I) -> Option<Self> {
        let cmf: Vec<f64> = weights
            .into_iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        match cmf.last() {
            Some(&total) if total > 0.0 => Some(Self { cmf }),
            _ => None,
        }
    }

    pub fn total(&self) -> f64 {
        self.cmf.last().copied().unwrap_or(0.0)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u = rng.gen::<f64>() * self.total();
        let idx = self.cmf.partition_point(|&c| c <= u);
        // u can round up to the total.
        idx.min(self.cmf.len() - 1)
    }
}

/// Draw one destination id from `row`.
fn choose<R: Rng + ?Sized>(row: &ProbRow, rng: &mut R) -> Option<usize> {
    let choice = WeightedChoice::from_weights(row.iter().map(|(_, w)| w))?;
    row.iter().nth(choice.sample(rng)).map(|(id, _)| id)
}

pub struct Sampler<'a> {
    hmm: &'a Hmm,
}

impl<'a> Sampler<'a> {
    pub fn new(hmm: &'a Hmm) -> Self {
        Self { hmm }
    }

    /// Walk the chain for `n` steps starting at the start state.
    ///
    /// A state without outgoing transitions ends the walk early, so the result
    /// may be shorter than `n`.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Sequence> {
        let hmm = self.hmm;
        let name = |id: usize| hmm.state_name(id).unwrap_or_default().to_string();
        let mut seq = Sequence::default();
        let mut current = hmm.start_id();

        for step in 0..n {
            let row = match current.and_then(|s| hmm.transitions().row(s)) {
                Some(row) if !row.is_empty() => row,
                _ => continue,
            };
            let next = choose(row, rng).ok_or_else(|| ConfigurationError::ZeroWeight {
                state: current.map(name).unwrap_or_default(),
            })?;

            let emissions = match hmm.emissions().row(next) {
                Some(row) if !row.is_empty() => row,
                _ => {
                    return Err(ConfigurationError::MissingEmissions { state: name(next) }.into())
                }
            };
            let symbol = choose(emissions, rng)
                .ok_or_else(|| ConfigurationError::ZeroWeight { state: name(next) })?;

            let state = hmm.state_name(next).unwrap_or_default();
            let output = hmm.symbol_name(symbol).unwrap_or_default();
            log::trace!("step {step}: {state} emits {output}");
            seq.push(state, output);
            current = Some(next);
        }
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn zero_weights_are_never_chosen() {
        let choice = WeightedChoice::from_weights([0.0, 1.0, 0.0, 2.0, 0.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let i = choice.sample(&mut rng);
            assert!(i == 1 || i == 3, "picked {i}");
        }
    }

    #[test]
    fn all_zero_has_no_choice() {
        assert!(WeightedChoice::from_weights([0.0, 0.0]).is_none());
        assert!(WeightedChoice::from_weights(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn frequencies_follow_weights() {
        let choice = WeightedChoice::from_weights([1.0, 3.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(1337);
        let n = 20_000;
        let ones = (0..n).filter(|_| choice.sample(&mut rng) == 1).count();
        let freq = ones as f64 / n as f64;
        assert!((freq - 0.75).abs() < 0.02, "{freq}");
    }

    #[test]
    fn zero_weight_transition_row_fails() {
        let mut b = Hmm::builder();
        b.transition("#", "a", 0.0).emission("a", "x", 1.0);
        let hmm = b.build().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = Sampler::new(&hmm).generate(3, &mut rng).unwrap_err();
        assert!(err.to_string().contains("zero total weight"), "{err}");
    }

    #[test]
    fn zero_weight_emission_row_fails() {
        let mut b = Hmm::builder();
        b.transition("#", "a", 1.0)
            .emission("a", "x", 0.0)
            .emission("a", "y", 0.0);
        let hmm = b.build().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        match Sampler::new(&hmm).generate(1, &mut rng) {
            Err(crate::Error::Configuration(ConfigurationError::ZeroWeight { state })) => {
                assert_eq!(state, "a")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
