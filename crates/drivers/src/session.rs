//! Interactive editing session: the driver plays the host. Outbound
//! configurations are written to the card file and handed back to the
//! panel, the way a host editor re-propagates its config.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use image_panel_adapters::save_config_file;
use image_panel_application::{ApplicationError, PanelAction, PanelController};
use image_panel_domain::PanelConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Panel(PanelAction),
    Select { index: usize, checked: bool },
    Move { from: usize, to: usize },
    Upload(Vec<PathBuf>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn parse_session_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    match word {
        "" | "show" => Ok(SessionCommand::Show),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        "url" => Ok(SessionCommand::Panel(PanelAction::NewImageUrlInput(
            rest.to_string(),
        ))),
        "add" => Ok(SessionCommand::Panel(PanelAction::AddNewImage)),
        "all" => Ok(SessionCommand::Panel(PanelAction::ToggleSelectAll)),
        "delete" => Ok(SessionCommand::Panel(PanelAction::DeleteSelected)),
        "select" | "unselect" => Ok(SessionCommand::Select {
            index: parse_index(rest)?,
            checked: word == "select",
        }),
        "move" => {
            let mut parts = rest.split_whitespace();
            let from = parse_index(parts.next().unwrap_or_default())?;
            let to = parse_index(parts.next().unwrap_or_default())?;
            Ok(SessionCommand::Move { from, to })
        }
        "title" => {
            let (index, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(SessionCommand::Panel(PanelAction::TitleInput {
                index: parse_index(index)?,
                value: value.trim().to_string(),
            }))
        }
        "index" => match rest {
            "on" => Ok(SessionCommand::Panel(PanelAction::ShowImageIndex(true))),
            "off" => Ok(SessionCommand::Panel(PanelAction::ShowImageIndex(false))),
            other => Err(format!("expected `index on` or `index off`, got `{other}`")),
        },
        "upload" => {
            let files: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if files.is_empty() {
                return Err("upload needs at least one path".to_string());
            }
            Ok(SessionCommand::Upload(files))
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.parse::<usize>()
        .map_err(|_| format!("invalid row index: `{text}`"))
}

pub fn apply_command(
    controller: &mut PanelController,
    command: SessionCommand,
) -> Result<Flow, ApplicationError> {
    match command {
        SessionCommand::Panel(action) => controller.dispatch(action)?,
        SessionCommand::Select { index, checked } => {
            let Some(url) = controller
                .state()
                .images()
                .get(index)
                .map(|image| image.url.clone())
            else {
                println!("no image at row {index}");
                return Ok(Flow::Continue);
            };
            controller.dispatch(PanelAction::ToggleSelection { url, checked })?;
        }
        SessionCommand::Move { from, to } => controller.on_drag_end(from, to)?,
        SessionCommand::Upload(files) => controller.pick_files(&files)?,
        SessionCommand::Show => controller.refresh()?,
        SessionCommand::Help => print_session_help(),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// The host side of the session: persists what the panel emits and feeds it
/// back in as the new inbound configuration.
pub struct FileHost {
    path: PathBuf,
    outbound: Receiver<PanelConfig>,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>, outbound: Receiver<PanelConfig>) -> Self {
        Self {
            path: path.into(),
            outbound,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn propagate(&self, controller: &mut PanelController) -> Result<usize, ApplicationError> {
        let mut propagated = 0;
        while let Ok(config) = self.outbound.try_recv() {
            save_config_file(&self.path, &config)?;
            log::info!(
                "saved {} image(s) to {}",
                config.images.len(),
                self.path.display()
            );
            controller.set_config(config)?;
            propagated += 1;
        }
        Ok(propagated)
    }
}

pub fn run_session(
    controller: &mut PanelController,
    host: &FileHost,
    input: Receiver<String>,
) -> Result<(), ApplicationError> {
    print_session_help();
    loop {
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match parse_session_command(&line) {
                Ok(command) => {
                    if apply_command(controller, command)? == Flow::Quit {
                        break;
                    }
                }
                Err(message) => println!("{message}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        host.propagate(controller)?;
        controller.tick()?;
        host.propagate(controller)?;
    }

    controller.flush()?;
    host.propagate(controller)?;
    Ok(())
}

fn print_session_help() {
    println!("commands:");
    println!("  url <text>          set the new image url");
    println!("  add                 append the new image url");
    println!("  upload <path>...    upload image files or folders");
    println!("  select|unselect <n> mark row n for bulk actions");
    println!("  all                 select all / deselect all");
    println!("  delete              delete selected rows");
    println!("  move <from> <to>    drag row `from` to position `to`");
    println!("  title <n> <text>    edit the title of row n");
    println!("  index on|off        show or hide the image index");
    println!("  show | help | quit");
}
