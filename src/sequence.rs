use std::fmt::{self, Display};

/// Observations paired with the hidden states that produced them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub states: Vec<String>,
    pub outputs: Vec<String>,
}

impl Sequence {
    pub fn push(&mut self, state: &str, output: &str) {
        self.states.push(state.to_string());
        self.outputs.push(output.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.states.join(" "))?;
        writeln!(f, "{}", self.outputs.join(" "))
    }
}
