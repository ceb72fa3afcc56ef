//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ha_config::Gesture;

#[derive(Debug, Parser)]
#[command(
    name = "ha-status",
    version,
    about = "Summarize Home Assistant entities the way a status card does"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Card configuration (YAML or JSON)
    #[arg(short, long, env = "HA_STATUS_CARD")]
    pub card: PathBuf,

    /// Home Assistant config directory holding `.storage/`
    #[arg(long, env = "HA_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Live state dump, as returned by `GET /api/states`
    #[arg(short, long, env = "HA_STATES")]
    pub states: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the summary tiles and person row
    Summary,

    /// Print the area groups of one category
    DrillDown {
        /// Category key, e.g. `light` or `Binary Sensor - door`
        category: String,

        /// List inactive entities too
        #[arg(long)]
        all: bool,
    },

    /// Print the intents a gesture on a tile would emit
    Gesture {
        /// Category key or entity id
        target: String,

        #[arg(value_enum, default_value_t = GestureArg::Tap)]
        gesture: GestureArg,
    },

    /// Print the intents of a confirmed category turn on/off
    Toggle {
        /// Category key
        category: String,
    },

    /// Print the per-domain entity ids the card considers
    Entities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GestureArg {
    Tap,
    Hold,
    DoubleTap,
}

impl From<GestureArg> for Gesture {
    fn from(arg: GestureArg) -> Self {
        match arg {
            GestureArg::Tap => Gesture::Tap,
            GestureArg::Hold => Gesture::Hold,
            GestureArg::DoubleTap => Gesture::DoubleTap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gesture_command() {
        let cli = Cli::try_parse_from([
            "ha-status",
            "--card",
            "card.yaml",
            "--states",
            "states.json",
            "gesture",
            "Binary Sensor - door",
            "double-tap",
        ])
        .unwrap();
        match cli.command {
            Command::Gesture { target, gesture } => {
                assert_eq!(target, "Binary Sensor - door");
                assert_eq!(Gesture::from(gesture), Gesture::DoubleTap);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.global.config_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
