use std::{fs, io, path::Path};

use periodic_glicko2::{InvalidConfig, MissingOpponentPolicy, RatingSystem, RatingSystemBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file")]
    Io(#[from] io::Error),
    #[error("could not parse config file")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// Rating system parameters shared by the command line tools. Flags override
/// values from the config file.
#[derive(clap::Args, Debug, Default)]
pub struct RatingSystemOpt {
    /// TOML file with rating system parameters.
    #[clap(long)]
    pub config: Option<std::path::PathBuf>,
    #[clap(long)]
    pub default_rating: Option<f64>,
    #[clap(long)]
    pub default_deviation: Option<f64>,
    #[clap(long)]
    pub default_volatility: Option<f64>,
    #[clap(long)]
    pub tau: Option<f64>,
    #[clap(long)]
    pub convergence_tolerance: Option<f64>,
    /// Fail on games against players that are not registered.
    #[clap(long)]
    pub strict: bool,
}

pub fn load_builder(path: &Path) -> Result<RatingSystemBuilder, ConfigError> {
    Ok(parse_builder(&fs::read_to_string(path)?)?)
}

pub fn parse_builder(s: &str) -> Result<RatingSystemBuilder, toml::de::Error> {
    toml::from_str(s)
}

impl RatingSystemOpt {
    pub fn rating_system(&self) -> Result<RatingSystem, ConfigError> {
        let mut builder = match self.config {
            Some(ref path) => load_builder(path)?,
            None => RatingSystem::builder(),
        };
        if let Some(default_rating) = self.default_rating {
            builder.default_rating(default_rating);
        }
        if let Some(default_deviation) = self.default_deviation {
            builder.default_deviation(default_deviation);
        }
        if let Some(default_volatility) = self.default_volatility {
            builder.default_volatility(default_volatility);
        }
        if let Some(tau) = self.tau {
            builder.tau(tau);
        }
        if let Some(convergence_tolerance) = self.convergence_tolerance {
            builder.convergence_tolerance(convergence_tolerance);
        }
        if self.strict {
            builder.missing_opponents(MissingOpponentPolicy::Reject);
        }
        Ok(builder.build()?)
    }
}
