//! Discrete hidden Markov models.
//!
//! A model is a pair of sparse tables: transitions between hidden states and
//! emissions from hidden states to observation symbols. The walk starts at the
//! pseudo-state `#`. Three algorithms run over a model:
//!
//! - [`Hmm::generate`] samples an observation sequence with a caller-supplied
//!   random source;
//! - [`Hmm::forward`] computes the probability of an observation sequence;
//! - [`Hmm::viterbi`] finds the most probable hidden-state path.
//!
//! ```
//! use hmmsuite::{Hmm, StateUniverse};
//!
//! let mut builder = Hmm::builder();
//! builder
//!     .transition("#", "sunny", 0.7)
//!     .transition("#", "rainy", 0.3)
//!     .transition("sunny", "sunny", 0.8)
//!     .transition("sunny", "rainy", 0.2)
//!     .transition("rainy", "rainy", 0.6)
//!     .transition("rainy", "sunny", 0.4)
//!     .emission("sunny", "walk", 0.9)
//!     .emission("sunny", "clean", 0.1)
//!     .emission("rainy", "walk", 0.2)
//!     .emission("rainy", "clean", 0.8);
//! let hmm = builder.build()?;
//!
//! let decoder = hmm.decoder(StateUniverse::Model);
//! let decoded = decoder.viterbi(&["walk", "walk", "clean"])?;
//! assert_eq!(decoded.states, ["sunny", "sunny", "rainy"]);
//! assert!(decoder.forward(&["walk", "walk", "clean"]) > decoded.probability);
//! # Ok::<(), hmmsuite::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod loader;
pub mod quark;
pub mod sequence;

pub use crate::config::Config;
pub use crate::error::{ConfigurationError, Error, Result};
pub use crate::evaluation::{Estimation, Evaluation};
pub use crate::hmm::decoder::{Decoded, Decoder, StateUniverse};
pub use crate::hmm::lattice::{Lattice, LatticeOpt};
pub use crate::hmm::model::{Hmm, HmmBuilder, HmmTables, START_STATE};
pub use crate::hmm::sampler::{Sampler, WeightedChoice};
pub use crate::sequence::Sequence;
