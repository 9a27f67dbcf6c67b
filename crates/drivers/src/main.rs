mod config;
mod logging;
mod session;
mod terminal;

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{channel, Receiver};

use clap::{Parser, Subcommand};
use config::{AppConfig, DEFAULT_SETTINGS_PATH};
use image_panel_adapters::{
    load_config_file, present_panel, ChannelConfigSink, EnglishCatalog, FsImageUploader,
    SystemClock,
};
use image_panel_application::{
    render_panel, DragReorderAdapter, PanelController, PanelState, IMAGES_LIST_ID,
};
use session::{run_session, FileHost};
use terminal::{TerminalDragBinder, TerminalSurface};

#[derive(Parser, Debug)]
#[command(
    name = "image-panel",
    version,
    about = "Edit the image list of a card configuration file"
)]
struct Cli {
    /// Log panel transitions and ignored inputs
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Panel settings (TOML); defaults are used when the file is missing
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the panel for a card configuration
    Show { config: PathBuf },
    /// Edit the image list interactively; changes are written back to the file
    Edit { config: PathBuf },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Command::Show { config } => {
            let app_config = load_app_config(config, &cli.settings)?;
            let card = load_config_file(&app_config.config_path)
                .map_err(|error| CommandError::Runtime(format!("load failed: {error}")))?;
            let view = render_panel(&PanelState::with_config(card));
            for line in present_panel(&view, &EnglishCatalog) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Edit { config } => {
            let app_config = load_app_config(config, &cli.settings)?;
            edit(&app_config)
        }
    }
}

fn load_app_config(
    config_path: PathBuf,
    settings_path: &std::path::Path,
) -> Result<AppConfig, CommandError> {
    if !config_path.is_file() {
        return Err(CommandError::Usage(format!(
            "card configuration not found: {}",
            config_path.display()
        )));
    }
    Ok(AppConfig::load(config_path, settings_path))
}

fn edit(app_config: &AppConfig) -> Result<(), CommandError> {
    let card = load_config_file(&app_config.config_path)
        .map_err(|error| CommandError::Runtime(format!("load failed: {error}")))?;
    let settings = &app_config.settings;

    let (sender, receiver) = channel();
    let mut controller = build_controller(app_config, ChannelConfigSink::new(sender));
    let host = FileHost::new(app_config.config_path.clone(), receiver);

    let runtime = |error: image_panel_application::ApplicationError| {
        CommandError::Runtime(format!("panel error: {error}"))
    };
    controller.set_config(card).map_err(runtime)?;
    controller.mount().map_err(runtime)?;
    log::info!(
        "editing {} (commit debounce {} ms)",
        host.path().display(),
        settings.commit_debounce_ms
    );

    run_session(&mut controller, &host, spawn_stdin_reader()).map_err(runtime)
}

fn build_controller(app_config: &AppConfig, sink: ChannelConfigSink) -> PanelController {
    let settings = &app_config.settings;
    PanelController::new(
        Box::new(sink),
        Box::new(TerminalSurface::new(std::io::stdout())),
        Box::new(TerminalDragBinder),
        Box::new(FsImageUploader::new(
            settings.upload_dir.clone(),
            settings.upload_url_prefix.clone(),
        )),
        Box::new(SystemClock::default()),
        settings.timings(),
    )
    .with_drag_adapter(DragReorderAdapter::new(
        IMAGES_LIST_ID,
        settings.drag_handle_selector.clone(),
    ))
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = channel();
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|error| log::error!("failed to start stdin reader: {error}"))
        .ok();
    receiver
}
