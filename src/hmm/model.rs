use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::BufWriter,
    path::Path,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    decoder::{Decoded, Decoder, StateUniverse},
    sampler::Sampler,
    table::ProbTable,
};
use crate::{
    error::{Error, Result},
    quark::{Quark, StringTable},
    sequence::Sequence,
};

/// Name of the initial pseudo-state. It only ever appears as a transition source.
pub const START_STATE: &str = "#";

/// A discrete hidden Markov model.
///
/// Built once through [`HmmBuilder`] and never mutated afterwards, so a model
/// can be shared between threads and used by any number of calls at once.
#[derive(Debug, Clone)]
pub struct Hmm {
    states: Quark,
    symbols: Quark,
    transitions: ProbTable,
    emissions: ProbTable,
}

impl Hmm {
    pub fn builder() -> HmmBuilder {
        HmmBuilder::default()
    }

    /// Number of interned states, the start state included when it has a row.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    pub fn state_id(&self, name: &str) -> Option<usize> {
        self.states.to_id(name)
    }

    pub fn state_name(&self, id: usize) -> Option<&str> {
        self.states.to_str(id)
    }

    pub fn symbol_id(&self, name: &str) -> Option<usize> {
        self.symbols.to_id(name)
    }

    pub fn symbol_name(&self, id: usize) -> Option<&str> {
        self.symbols.to_str(id)
    }

    pub fn start_id(&self) -> Option<usize> {
        self.states.to_id(START_STATE)
    }

    /// `T(src, dst)`, 0.0 when absent.
    pub fn transition(&self, src: &str, dst: &str) -> f64 {
        self.transitions.prob(self.state_id(src), self.state_id(dst))
    }

    /// `E(state, symbol)`, 0.0 when absent.
    pub fn emission(&self, state: &str, symbol: &str) -> f64 {
        self.emissions.prob(self.state_id(state), self.symbol_id(symbol))
    }

    /// States with an emission row, in id order.
    pub fn emitting_states(&self) -> Vec<usize> {
        self.emissions.rows().map(|(id, _)| id).collect()
    }

    pub(crate) fn transitions(&self) -> &ProbTable {
        &self.transitions
    }

    pub(crate) fn emissions(&self) -> &ProbTable {
        &self.emissions
    }

    pub fn decoder(&self, universe: StateUniverse) -> Decoder<'_> {
        Decoder::new(self, universe)
    }

    /// Forward probability of `observations` over the observed state universe.
    pub fn forward<S: AsRef<str>>(&self, observations: &[S]) -> f64 {
        self.decoder(StateUniverse::default()).forward(observations)
    }

    /// Most likely state path for `observations` over the observed state universe.
    pub fn viterbi<S: AsRef<str>>(&self, observations: &[S]) -> Result<Decoded> {
        self.decoder(StateUniverse::default()).viterbi(observations)
    }

    /// Sample up to `n` observations by walking the chain from [`START_STATE`].
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Sequence> {
        Sampler::new(self).generate(n, rng)
    }

    /// Write the model as JSON tables.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &HmmTables::from(self))?;
        Ok(())
    }
}

/// Accumulates table entries and validates them into an [`Hmm`].
#[derive(Debug, Default)]
pub struct HmmBuilder {
    states: Quark,
    symbols: Quark,
    transitions: ProbTable,
    emissions: ProbTable,
    invalid: Vec<String>,
}

impl HmmBuilder {
    pub fn transition(&mut self, src: &str, dst: &str, prob: f64) -> &mut Self {
        self.check_weight("transition", src, dst, prob);
        let s = self.states.find_or_insert(src);
        let d = self.states.find_or_insert(dst);
        self.transitions.set(s, d, prob);
        self
    }

    pub fn emission(&mut self, state: &str, symbol: &str, prob: f64) -> &mut Self {
        self.check_weight("emission", state, symbol, prob);
        let s = self.states.find_or_insert(state);
        let o = self.symbols.find_or_insert(symbol);
        self.emissions.set(s, o, prob);
        self
    }

    fn check_weight(&mut self, kind: &str, src: &str, dst: &str, prob: f64) {
        if !(0.0..=1.0).contains(&prob) {
            self.invalid
                .push(format!("{kind} {src} -> {dst} has weight {prob}"));
        }
    }

    pub fn build(self) -> Result<Hmm> {
        if let Some(msg) = self.invalid.into_iter().next() {
            return Err(Error::InvalidModel(msg));
        }
        if let Some(start) = self.states.to_id(START_STATE) {
            if self.emissions.has_row(start) {
                return Err(Error::InvalidModel(format!(
                    "start state '{START_STATE}' must not emit"
                )));
            }
            for (src, row) in self.transitions.rows() {
                if row.iter().any(|(dst, _)| dst == start) {
                    return Err(Error::InvalidModel(format!(
                        "start state '{START_STATE}' is a destination of '{}'",
                        self.states.to_str(src).unwrap_or_default()
                    )));
                }
            }
        }
        let sinks: BTreeSet<usize> = self
            .transitions
            .rows()
            .flat_map(|(_, row)| row.iter().map(|(dst, _)| dst))
            .filter(|&dst| !self.emissions.has_row(dst))
            .collect();
        for dst in sinks {
            log::warn!(
                "state '{}' has no emissions; treating it as a sink",
                self.states.to_str(dst).unwrap_or_default()
            );
        }
        log::debug!(
            "built hmm: {} states, {} symbols",
            self.states.len(),
            self.symbols.len()
        );
        Ok(Hmm {
            states: self.states,
            symbols: self.symbols,
            transitions: self.transitions,
            emissions: self.emissions,
        })
    }
}

/// Serialized form of a model: `source -> target -> probability` per table.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmmTables {
    #[serde(default)]
    pub transitions: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub emissions: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TryFrom<HmmTables> for Hmm {
    type Error = Error;

    fn try_from(tables: HmmTables) -> Result<Self> {
        let mut builder = Hmm::builder();
        for (src, row) in &tables.transitions {
            for (dst, &p) in row {
                builder.transition(src, dst, p);
            }
        }
        for (state, row) in &tables.emissions {
            for (symbol, &p) in row {
                builder.emission(state, symbol, p);
            }
        }
        builder.build()
    }
}

impl From<&Hmm> for HmmTables {
    fn from(hmm: &Hmm) -> Self {
        let collect = |table: &ProbTable, names: &Quark| -> BTreeMap<String, BTreeMap<String, f64>> {
            table
                .rows()
                .map(|(src, row)| {
                    let entries: BTreeMap<String, f64> = row
                        .iter()
                        .map(|(dst, p)| (names.to_str(dst).unwrap_or_default().to_string(), p))
                        .collect();
                    (hmm.states.to_str(src).unwrap_or_default().to_string(), entries)
                })
                .collect()
        };
        Self {
            transitions: collect(&hmm.transitions, &hmm.states),
            emissions: collect(&hmm.emissions, &hmm.symbols),
        }
    }
}
