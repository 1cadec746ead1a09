//! Training and scoring options, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::confusion::AccumulationMode;
use crate::Result;

/// `Config` selects the training and scoring variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Add one to every confusion count and 26 to every baseline.
    pub smoothing: bool,
    /// Turn raw confusion counts into rates against the raw training text.
    pub normalize: bool,
    /// How much of each training alignment is charged.
    pub mode: AccumulationMode,
    /// Also try `?` when generating candidates.
    pub extended_alphabet: bool,
}

impl Config {
    /// `from_json_file` reads options from a JSON file; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid JSON config.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `alphabet` is the candidate alphabet these options select.
    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        if self.extended_alphabet {
            Alphabet::extended()
        } else {
            Alphabet::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"smoothing": true}"#).unwrap();
        assert_eq!(
            config,
            Config {
                smoothing: true,
                ..Config::default()
            }
        );
        assert_eq!(config.mode, AccumulationMode::Full);
        assert_eq!(config.alphabet(), Alphabet::standard());
    }

    #[test]
    fn reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"normalize": true, "mode": "first-difference", "extended-alphabet": true}"#,
        )
        .unwrap();

        let config = Config::from_json_file(file.path()).unwrap();
        assert!(config.normalize);
        assert!(!config.smoothing);
        assert_eq!(config.mode, AccumulationMode::FirstDifference);
        assert!(config.alphabet().contains('?'));
    }
}
