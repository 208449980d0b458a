// TUI module: history browser/editor and usage dashboard
mod app;
mod charts;
mod confirm;
mod events;
mod layout;
mod rendering;
mod sections;
mod terminal;

use std::sync::Arc;

use anyhow::Result;
pub use app::App;
pub use confirm::ModalConfirmer;
pub use sections::{Section, SectionBus};
use terminal::TerminalManager;
use tokio::runtime::Handle;

use crate::api::HistoryApi;
use crate::clipboard::SystemClipboard;
use crate::config::ConsoleConfig;

/// Run the interactive TUI. Remote calls are spawned on `runtime`.
pub fn run_interactive(api: Arc<dyn HistoryApi>, config: &ConsoleConfig, runtime: Handle) -> Result<()> {
    let mut app =
        App::new(api, runtime, Box::new(SystemClipboard::new()), config.download_dir.clone());

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
