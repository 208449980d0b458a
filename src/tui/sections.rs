//! Section visibility channel.
//!
//! Whatever switches sections publishes the newly visible [`Section`]; subscribers react
//! (History reloads the active search, Dashboard fetches a fresh snapshot) without
//! knowing which key or control caused the switch.

use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    History,
    Dashboard,
}

impl Section {
    pub fn next(self) -> Self {
        match self {
            Section::History => Section::Dashboard,
            Section::Dashboard => Section::History,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::History => "History",
            Section::Dashboard => "Dashboard",
        }
    }
}

/// Broadcast-backed bus for "section became visible"
#[derive(Clone, Debug)]
pub struct SectionBus {
    sender: broadcast::Sender<Section>,
}

impl SectionBus {
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Section> {
        self.sender.subscribe()
    }

    pub fn publish(&self, section: Section) {
        debug!("section visible: {:?}", section);
        // No subscribers is fine
        let _ = self.sender.send(section);
    }
}
