//! Entry point that parses the command line arguments
//! and provides a shared way for interfaces to start a session.

use std::fs;

use clap::Parser;
use skirmish_core::prelude::*;

#[derive(Debug)]
pub enum StartFlow {
    /// Start right away with these settings
    NewGame { settings: GameSettings },

    /// Write the settings to stdout and exit
    PrintConfig { settings: GameSettings },
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("can't read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl StartFlow {
    pub fn from_args() -> Result<StartFlow, FlowError> {
        FlowArgs::parse().try_into()
    }

    pub fn settings(&self) -> &GameSettings {
        match self {
            StartFlow::NewGame { settings } | StartFlow::PrintConfig { settings } => settings,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct FlowArgs {
    /// Config path, a ron file with the game settings
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the map and the items, overrides the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the resulting settings and exit
    #[arg(long)]
    print_config: bool,
}

impl TryFrom<FlowArgs> for StartFlow {
    type Error = FlowError;

    fn try_from(value: FlowArgs) -> Result<Self, Self::Error> {
        let settings = match value.config {
            Some(path) => {
                let config_str = fs::read_to_string(&path).map_err(|source| FlowError::Io {
                    path: path.clone(),
                    source,
                })?;
                GameSettings::from_string(&config_str)?
            }
            None => GameSettings::default(),
        }
        .with_seed(value.seed);
        Ok(if value.print_config {
            StartFlow::PrintConfig { settings }
        } else {
            StartFlow::NewGame { settings }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_args_is_a_default_game() {
        let flow: StartFlow = FlowArgs::parse_from(["skirmish"]).try_into().unwrap();
        assert!(matches!(flow, StartFlow::NewGame { .. }));
        assert_eq!(flow.settings(), &GameSettings::default());
    }

    #[test]
    fn seed_flag_sets_the_seed() {
        let flow: StartFlow = FlowArgs::parse_from(["skirmish", "--seed", "42", "--print-config"])
            .try_into()
            .unwrap();
        assert!(matches!(flow, StartFlow::PrintConfig { .. }));
        assert_eq!(flow.settings().seed, Some(42));
    }

    #[test]
    fn missing_config_is_an_error() {
        let result: Result<StartFlow, _> =
            FlowArgs::parse_from(["skirmish", "-c", "/nonexistent/skirmish.ron"]).try_into();
        assert!(matches!(result, Err(FlowError::Io { .. })));
    }
}
