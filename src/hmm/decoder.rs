use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{
    lattice::{Lattice, LatticeOpt},
    model::Hmm,
};
use crate::error::{ConfigurationError, Result};

/// Which states the forward and Viterbi engines consider at every time step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StateUniverse {
    /// The distinct tokens of the observation sequence, in order of first
    /// appearance, each read as a state name.
    #[default]
    Observed,
    /// Every state with an emission row, in model id order.
    Model,
}

/// Result of Viterbi decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// One state per observation.
    pub states: Vec<String>,
    /// Probability of the returned path jointly with the observations.
    pub probability: f64,
}

/// A candidate hidden state: its name and its id in the model, if any.
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    id: Option<usize>,
}

pub struct Decoder<'a> {
    model: &'a Hmm,
    universe: StateUniverse,
}

impl<'a> Decoder<'a> {
    pub fn new(model: &'a Hmm, universe: StateUniverse) -> Self {
        Self { model, universe }
    }

    fn candidates<S: AsRef<str>>(&self, observations: &[S]) -> Vec<Candidate> {
        match self.universe {
            StateUniverse::Observed => {
                let mut seen: Vec<Candidate> = Vec::new();
                for o in observations {
                    let name = o.as_ref();
                    if !seen.iter().any(|c| c.name == name) {
                        seen.push(Candidate {
                            name: name.to_string(),
                            id: self.model.state_id(name),
                        });
                    }
                }
                seen
            }
            StateUniverse::Model => self
                .model
                .emitting_states()
                .into_iter()
                .map(|id| Candidate {
                    name: self.model.state_name(id).unwrap_or_default().to_string(),
                    id: Some(id),
                })
                .collect(),
        }
    }

    /// Build a lattice with transition and emission probabilities filled in.
    fn lattice<S: AsRef<str>>(
        &self,
        opt: LatticeOpt,
        observations: &[S],
    ) -> (Lattice, Vec<Candidate>) {
        let candidates = self.candidates(observations);
        let transitions = self.model.transitions();
        let emissions = self.model.emissions();
        let l_n = candidates.len();
        let mut lat = Lattice::new(opt, l_n, observations.len());
        log::debug!(
            "lattice: {} items x {} states ({:?})",
            observations.len(),
            l_n,
            self.universe
        );

        let start = self.model.start_id();
        for (j, c) in candidates.iter().enumerate() {
            lat.initial[j] = transitions.prob(start, c.id);
        }
        for (i, src) in candidates.iter().enumerate() {
            for (j, dst) in candidates.iter().enumerate() {
                lat.trans[l_n * i + j] = transitions.prob(src.id, dst.id);
            }
        }
        for (t, o) in observations.iter().enumerate() {
            let symbol = self.model.symbol_id(o.as_ref());
            for (j, c) in candidates.iter().enumerate() {
                lat.state[l_n * t + j] = emissions.prob(c.id, symbol);
            }
        }
        (lat, candidates)
    }

    /// The filled forward lattice, for inspecting `α[t][s]`.
    pub fn forward_lattice<S: AsRef<str>>(&self, observations: &[S]) -> Lattice {
        let (mut lat, _) = self.lattice(LatticeOpt::FORWARD, observations);
        lat.forward_score();
        lat
    }

    /// Total probability of `observations`, summed over all state paths.
    ///
    /// 0.0 means the sequence is impossible under the model.
    pub fn forward<S: AsRef<str>>(&self, observations: &[S]) -> f64 {
        self.forward_lattice(observations).total()
    }

    /// Names of the candidate states, in lattice order.
    pub fn state_names<S: AsRef<str>>(&self, observations: &[S]) -> Vec<String> {
        self.candidates(observations)
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    /// Most probable state path for `observations`.
    pub fn viterbi<S: AsRef<str>>(&self, observations: &[S]) -> Result<Decoded> {
        if observations.is_empty() {
            return Err(ConfigurationError::EmptySequence.into());
        }
        let (mut lat, candidates) = self.lattice(LatticeOpt::VITERBI, observations);
        if candidates.is_empty() {
            return Err(ConfigurationError::NoCandidateStates.into());
        }
        let mut labels = vec![0; observations.len()];
        let probability = lat.viterbi(&mut labels);
        let states = labels
            .into_iter()
            .map(|l| candidates[l].name.clone())
            .collect();
        Ok(Decoded {
            states,
            probability,
        })
    }
}
