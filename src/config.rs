use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, hmm::decoder::StateUniverse};

/// Run settings, read from a JSON file. Missing fields take their defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub universe: StateUniverse,
    /// Seed for the sampler; entropy from the OS when absent.
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        let config: Config = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.universe, StateUniverse::Observed);
    }

    #[test]
    fn universe_by_name() {
        let config: Config = serde_json::from_str(r#"{"universe": "model"}"#).unwrap();
        assert_eq!(config.universe, StateUniverse::Model);
    }
}
