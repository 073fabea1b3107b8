use clap::{Parser, Subcommand};
use fandial::config;
use fandial::events::ControlCommand;
use fandial::gui::app::AppModel;
use fandial::gui::dial::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use fandial::sys::runtime::{self, Services};
use fandial::sys::server::{self, DEFAULT_SOCKET_PATH};
use fandial_core::{Dial, DialState, DialStyle, Level, Renderable};
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fandial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the platform default
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Control socket the widget listens on
    #[arg(short = 's', long, global = true, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Advance the running dial to its next speed.
    Tap,
    /// Write the default config file if none exists and print its path.
    InitConfig,
    /// Render the dial to a PNG without opening a window.
    Render {
        output: PathBuf,

        /// Speed to render: off, low, medium or high
        #[arg(short = 'l', long, default_value = "off")]
        level: Level,

        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: i32,

        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tap) => server::send_command(&cli.socket, ControlCommand::Activate),
        Some(Commands::InitConfig) => {
            let path = config::resolve_config_path(cli.config)?;
            config::write_default_config(&path)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::Render {
            output,
            level,
            width,
            height,
        }) => render(cli.config, &output, level, width, height),
        None => run(cli.config, cli.socket),
    }
}

fn load_dial(config_path: &std::path::Path, state: DialState) -> Dial {
    let config = config::load_or_default(config_path);
    Dial::with_state(
        state,
        config.dial_colors(),
        DialStyle::default(),
        config.label_table(),
    )
}

fn render(
    config_path: Option<PathBuf>,
    output: &std::path::Path,
    level: Level,
    width: i32,
    height: i32,
) -> anyhow::Result<()> {
    if width <= 0 || height <= 0 {
        anyhow::bail!("Snapshot size must be positive, got {}x{}", width, height);
    }
    let config_path = config::resolve_config_path(config_path)?;
    let mut dial = load_dial(&config_path, DialState::starting_at(level));
    dial.size_changed(width, height);
    dial::write_png(&dial, output)?;
    log::info!("Rendered {} dial to {}", level, output.display());
    Ok(())
}

fn run(config_path: Option<PathBuf>, socket_path: PathBuf) -> anyhow::Result<()> {
    let config_path = config::resolve_config_path(config_path)?;
    let dial = load_dial(&config_path, DialState::new());

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(
        tx,
        Services {
            socket_path,
            config_path: config_path.clone(),
        },
    )?;

    // clap already consumed the arguments; keep GTK from parsing them again
    let app = RelmApp::new("org.fandial.dial").with_args(Vec::new());

    app.run::<AppModel>((dial, config_path, rx));
    Ok(())
}
