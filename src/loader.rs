//! Reading models from disk.
//!
//! The text format is two files sharing a basename: `<basename>.trans` holds
//! `source target probability` lines, `<basename>.emit` holds
//! `state symbol probability` lines. Blank lines are ignored.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    hmm::model::{Hmm, HmmBuilder, HmmTables},
};

fn read_triples<F>(path: &Path, mut insert: F) -> Result<()>
where
    F: FnMut(&str, &str, f64),
{
    let file = File::open(path)?;
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let parse_error = |message: String| Error::Parse {
            path: path.to_path_buf(),
            line: n + 1,
            message,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [src, dst, score] => {
                let p: f64 = score
                    .parse()
                    .map_err(|_| parse_error(format!("invalid probability '{score}'")))?;
                insert(*src, *dst, p);
            }
            _ => {
                return Err(parse_error(format!(
                    "expected 3 fields, found {}",
                    fields.len()
                )))
            }
        }
    }
    Ok(())
}

fn with_extension(basename: &Path, ext: &str) -> PathBuf {
    let mut s = basename.as_os_str().to_os_string();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Load `<basename>.trans` and `<basename>.emit`.
pub fn load<P: AsRef<Path>>(basename: P) -> Result<Hmm> {
    let basename = basename.as_ref();
    let mut builder = HmmBuilder::default();
    let trans = with_extension(basename, "trans");
    let emit = with_extension(basename, "emit");
    read_triples(&trans, |s, d, p| {
        builder.transition(s, d, p);
    })?;
    read_triples(&emit, |s, o, p| {
        builder.emission(s, o, p);
    })?;
    log::info!("loaded {} and {}", trans.display(), emit.display());
    builder.build()
}

/// Load a model written by [`Hmm::dump`].
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Hmm> {
    let file = File::open(path)?;
    let tables: HmmTables = serde_json::from_reader(BufReader::new(file))?;
    Hmm::try_from(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_appended() {
        assert_eq!(
            with_extension(Path::new("models/two.english"), "trans"),
            PathBuf::from("models/two.english.trans")
        );
    }
}
