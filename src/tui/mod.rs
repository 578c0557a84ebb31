//! Interactive terminal front end
mod app;
mod events;
mod layout;
mod markdown;
mod rendering;
mod terminal;
mod theme;
mod timestamps;

use std::sync::Arc;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;
use tokio::runtime::Handle;

use crate::controller::ResearchController;
use crate::storage::KeyValueStore;

/// Run the interactive TUI until the user quits.
///
/// Searches are spawned on `runtime`; the calling thread runs the event loop
/// and must not be a runtime worker.
pub fn run_interactive(
    controller: ResearchController,
    preferences: Arc<dyn KeyValueStore>,
    runtime: Handle,
) -> Result<()> {
    let mut app = App::new(controller, preferences, runtime);

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
