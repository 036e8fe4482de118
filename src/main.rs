use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mousemap::model::{KeyboardShortcut, MouseButton, MouseModel, PresetAction};
use mousemap::store::JsonFileStorage;

mod cli;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(author, about, version, max_term_width = 80)]
struct Options {
    /// Configuration file (defaults to $MOUSEMAP_CONFIG, then the user data dir).
    #[clap(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output, including every observed button event.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the remapping agent (default).
    Run,
    /// Show the global state of the configuration.
    Status,
    /// List all profiles with their assigned buttons.
    Profiles,
    /// Show which profile applies to an application.
    Resolve {
        /// Bundle identifier; omit for the default profile.
        bundle_id: Option<String>,
    },
    /// Add a profile scoped to one application.
    AddProfile {
        #[clap(long)]
        name: String,
        #[clap(long)]
        bundle_id: String,
    },
    /// Remove an application profile.
    RemoveProfile {
        /// Profile id, bundle identifier or name.
        profile: String,
    },
    /// Assign or clear the action of one button.
    #[clap(group(ArgGroup::new("action").required(true).args(["shortcut", "preset", "clear"])))]
    Map {
        /// Profile id, bundle identifier, name, or `default`.
        #[clap(long, default_value = "default")]
        profile: String,
        /// Button code (2-11) or name (middle, back, forward, button5..).
        #[clap(long)]
        button: MouseButton,
        /// Keyboard shortcut such as `cmd+shift+n`.
        #[clap(long)]
        shortcut: Option<KeyboardShortcut>,
        /// Preset action such as `mission_control`.
        #[clap(long)]
        preset: Option<PresetAction>,
        /// Leave the button unassigned.
        #[clap(long)]
        clear: bool,
    },
    /// Turn remapping on.
    Enable,
    /// Turn remapping off.
    Disable,
    /// Record whether the agent should start at login.
    LaunchAtLogin {
        #[clap(value_enum)]
        state: Switch,
    },
    /// List mouse models, or select one.
    Model { model: Option<MouseModel> },
    /// List preset actions.
    Presets,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Switch {
    On,
    Off,
}

fn main() -> Result<()> {
    let options = Options::parse();

    // Setup logging.
    let default = if options.verbose { "warn,mousemap=debug" } else { "warn,mousemap=info" };
    let directives = env::var("RUST_LOG").unwrap_or(default.into());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    FmtSubscriber::builder().with_env_filter(env_filter).with_line_number(true).init();

    let storage = match options.config {
        Some(path) => JsonFileStorage::new(path),
        None => JsonFileStorage::at_default_location()?,
    };

    match options.command.unwrap_or(Command::Run) {
        Command::Run => cli::run_agent(storage),
        Command::Status => cli::status(storage),
        Command::Profiles => cli::profiles(storage),
        Command::Resolve { bundle_id } => cli::resolve(storage, bundle_id.as_deref()),
        Command::AddProfile { name, bundle_id } => cli::add_profile(storage, &name, &bundle_id),
        Command::RemoveProfile { profile } => cli::remove_profile(storage, &profile),
        Command::Map { profile, button, shortcut, preset, clear: _ } => {
            cli::map(storage, &profile, button, cli::action_from(shortcut, preset))
        },
        Command::Enable => cli::set_enabled(storage, true),
        Command::Disable => cli::set_enabled(storage, false),
        Command::LaunchAtLogin { state } => {
            cli::set_launch_at_login(storage, matches!(state, Switch::On))
        },
        Command::Model { model } => cli::model(storage, model),
        Command::Presets => {
            cli::presets();
            Ok(())
        },
    }
}
