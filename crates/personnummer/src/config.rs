//! Generator configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::error::ParseGenderError;
use crate::identity::{DEFAULT_MAX_AGE, DEFAULT_MIN_AGE, Gender, IdentityRequest};

/// Number of identity numbers generated when no count is configured.
pub const DEFAULT_COUNT: usize = 1;

/// Configuration values controlling test data generation.
///
/// Values come from `PERSONNUMMER_*` environment variables or configuration
/// files; command line flags override them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERSONNUMMER")]
pub struct GeneratorSettings {
    /// RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Number of identity numbers to generate.
    #[ortho_config(default = 1)]
    pub count: usize,
    /// Minimum age of generated identities.
    pub min_age: Option<u32>,
    /// Maximum age of generated identities.
    pub max_age: Option<u32>,
    /// Gender of generated identities (`female` or `male`).
    pub gender: Option<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            count: DEFAULT_COUNT,
            min_age: None,
            max_age: None,
            gender: None,
        }
    }
}

impl GeneratorSettings {
    /// Return the configured count.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Build the identity request described by the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGenderError`] if the configured gender is not a known
    /// label.
    pub fn request(&self) -> Result<IdentityRequest, ParseGenderError> {
        let gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()?;
        Ok(IdentityRequest {
            min_age: self.min_age.unwrap_or(DEFAULT_MIN_AGE),
            max_age: self.max_age.unwrap_or(DEFAULT_MAX_AGE),
            gender,
        })
    }
}
