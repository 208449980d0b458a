//! TUI application state and event handling.
//!
//! The `App` owns the [`AppContext`] and runs a synchronous draw/poll loop. Remote calls
//! never run on that loop: each one is spawned on the tokio runtime and reports back
//! through an [`AppEvent`] channel that the loop drains between frames. Responses that
//! arrive after being superseded are dropped by the context's sequencing.
//!
//! Section switches go through the [`SectionBus`]; the loop reacts to "History became
//! visible" with a reload and to "Dashboard became visible" with a fresh snapshot.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use super::confirm::ModalConfirmer;
use super::events::{Action, AppEvent, InputMode, poll_event};
use super::rendering::{RenderState, render_ui};
use super::sections::{Section, SectionBus};
use crate::api::HistoryApi;
use crate::clipboard::{ClipboardProvider, copy_with_provider};
use crate::context::AppContext;
use crate::controllers::{MutationGateway, SearchRequest};
use crate::dashboard::save_report;
use crate::error::EditError;
use crate::models::{Record, RecordId};
use crate::store::ListView;

/// Longest search query accepted from the keyboard
const MAX_QUERY_CHARS: usize = 256;
/// Rows moved by PageUp/PageDown
const PAGE_SIZE: isize = 10;

/// Yes/no prompt waiting for the user
struct PendingConfirm {
    prompt: String,
    reply: oneshot::Sender<bool>,
}

pub struct App {
    context: AppContext,
    api: Arc<dyn HistoryApi>,
    gateway: MutationGateway,
    runtime: Handle,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    sections: SectionBus,
    section_rx: broadcast::Receiver<Section>,
    section: Section,
    query: String,
    selected_idx: usize,
    pending_confirms: VecDeque<PendingConfirm>,
    clipboard: Box<dyn ClipboardProvider>,
    download_dir: PathBuf,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        api: Arc<dyn HistoryApi>,
        runtime: Handle,
        clipboard: Box<dyn ClipboardProvider>,
        download_dir: PathBuf,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let confirmer = Arc::new(ModalConfirmer::new(events_tx.clone()));
        let gateway = MutationGateway::new(Arc::clone(&api), confirmer);
        let sections = SectionBus::new(16);
        let section_rx = sections.subscribe();

        Self {
            context: AppContext::new(),
            api,
            gateway,
            runtime,
            events_tx,
            events_rx,
            sections,
            section_rx,
            section: Section::History,
            query: String::new(),
            selected_idx: 0,
            pending_confirms: VecDeque::new(),
            clipboard,
            download_dir,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.sections.publish(self.section);

        while !self.should_quit {
            self.process_section_changes();
            self.drain_events();
            if self.context.notifications_mut().prune(Instant::now()) {
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (resize, notification fade)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state(now)))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50), self.input_mode())?;
            self.handle_action(action);
        }

        // Unblock any task still waiting on a prompt
        for pending in self.pending_confirms.drain(..) {
            let _ = pending.reply.send(false);
        }
        Ok(())
    }

    fn render_state(&self, now: Instant) -> RenderState<'_> {
        RenderState {
            section: self.section,
            query: &self.query,
            list: self.context.records().view(),
            selected_idx: self.selected_idx,
            sessions: self.context.sessions(),
            dashboard: self.context.dashboard().view(),
            dashboard_loading: self.context.dashboard().is_loading(),
            notification: self.context.notifications().current(),
            now,
            confirm_prompt: self.pending_confirms.front().map(|p| p.prompt.as_str()),
        }
    }

    fn input_mode(&self) -> InputMode {
        if !self.pending_confirms.is_empty() {
            return InputMode::Confirm;
        }
        match self.section {
            Section::Dashboard => InputMode::Dashboard,
            Section::History => match self.selected_id() {
                Some(id) if self.context.sessions().get(id).is_some() => InputMode::Edit,
                _ => InputMode::Browse,
            },
        }
    }

    /// Ids of the selectable rows: displayed records, then detached edit sessions
    fn row_ids(&self) -> Vec<RecordId> {
        let displayed: &[Record] = match self.context.records().view() {
            ListView::Records(records) => records,
            _ => &[],
        };
        let detached = self.context.sessions().detached_ids(displayed);
        displayed.iter().map(|r| r.id).chain(detached).collect()
    }

    fn displayed_count(&self) -> usize {
        self.row_ids().len()
    }

    fn selected_id(&self) -> Option<RecordId> {
        self.row_ids().get(self.selected_idx).copied()
    }

    fn process_section_changes(&mut self) {
        loop {
            match self.section_rx.try_recv() {
                Ok(Section::History) => {
                    let request = self.context.begin_reload();
                    self.spawn_search(request);
                }
                Ok(Section::Dashboard) => self.spawn_dashboard_fetch(),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("section bus lagged by {}", skipped);
                }
                Err(_) => break,
            }
            self.needs_redraw = true;
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.process_event(event);
        }
    }

    /// Apply the completion of a background task
    fn process_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchLoaded { ticket, result } => {
                let previous = self.selected_id();
                self.context.complete_search(ticket, result);
                self.reselect(previous);
            }
            AppEvent::SaveFinished { id, result } => match self.context.complete_save(id, result) {
                Ok(reload) => self.spawn_search(reload),
                Err(e) => debug!("save of record {} not applied: {}", id, e),
            },
            AppEvent::DeleteFinished { id, result } => {
                match self.context.complete_delete(id, result) {
                    Ok(Some(reload)) => self.spawn_search(reload),
                    Ok(None) => {}
                    Err(e) => debug!("delete of record {} not applied: {}", id, e),
                }
            }
            AppEvent::StatsLoaded { ticket, result } => {
                self.context.complete_dashboard(ticket, result);
            }
            AppEvent::ReportSaved(result) => {
                let _ = self.context.complete_report(result);
            }
            AppEvent::PdfReady(result) => {
                if let Ok(url) = self.context.complete_pdf(result) {
                    match copy_with_provider(&url, self.clipboard.as_mut()) {
                        Ok(()) => self
                            .context
                            .notifications_mut()
                            .success(format!("PDF report ready, URL copied: {}", url)),
                        Err(e) => warn!("could not copy PDF URL: {}", e),
                    }
                }
            }
            AppEvent::ConfirmRequested { prompt, reply } => {
                self.pending_confirms.push_back(PendingConfirm { prompt, reply });
            }
        }
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchSection => {
                self.section = self.section.next();
                self.sections.publish(self.section);
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::Search => {
                let request = self.context.begin_search(&self.query);
                self.selected_idx = 0;
                self.spawn_search(request);
            }
            Action::QueryChar(c) => {
                if self.query.chars().count() < MAX_QUERY_CHARS {
                    self.query.push(c);
                }
            }
            Action::QueryBackspace => {
                self.query.pop();
            }
            Action::ClearQuery => self.query.clear(),
            Action::StartEdit => {
                if let Some(id) = self.selected_id()
                    && let Err(e) = self.context.start_edit(id)
                {
                    self.context.notifications_mut().error(e.to_string());
                }
            }
            Action::Delete => {
                if let Some(id) = self.selected_id() {
                    self.spawn_delete(id);
                }
            }
            Action::CopyUtterance => self.copy_selected(),
            Action::GeneratePdf => self.spawn_pdf(),
            Action::EditChar(c) => self.edit_selected(|s| s.push_char(c)),
            Action::EditBackspace => self.edit_selected(|s| s.pop_char()),
            Action::ToggleField => self.edit_selected(|s| {
                s.toggle_focus();
                Ok(())
            }),
            Action::Save => {
                if let Some(id) = self.selected_id() {
                    self.save(id);
                }
            }
            Action::CancelEdit => {
                if let Some(id) = self.selected_id() {
                    match self.context.cancel_edit(id) {
                        Ok(_) => {
                            self.context.notifications_mut().info("Edit cancelled");
                            // A detached row disappears with its session
                            self.reselect(Some(id));
                        }
                        Err(EditError::Busy(_)) => {
                            self.context.notifications_mut().info("Save in progress")
                        }
                        Err(e) => debug!("cancel ignored: {}", e),
                    }
                }
            }
            Action::ConfirmYes => self.answer_confirm(true),
            Action::ConfirmNo => self.answer_confirm(false),
            Action::Refresh => self.spawn_dashboard_fetch(),
            Action::DownloadReport => self.spawn_report(),
            Action::None => return,
        }
        self.needs_redraw = true;
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.displayed_count();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);
    }

    /// Keep the cursor on the same record across a reload when it is still listed
    fn reselect(&mut self, previous: Option<RecordId>) {
        let rows = self.row_ids();
        match previous.and_then(|id| rows.iter().position(|row| *row == id)) {
            Some(idx) => self.selected_idx = idx,
            None => self.selected_idx = self.selected_idx.min(rows.len().saturating_sub(1)),
        }
    }

    fn edit_selected<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut crate::editing::EditSession) -> std::result::Result<(), EditError>,
    {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.context.session_mut(id).and_then(edit) {
            // Busy while saving: keystrokes are dropped
            debug!("edit ignored: {}", e);
        }
    }

    fn copy_selected(&mut self) {
        let Some(record) = self.selected_id().and_then(|id| self.context.records().get(id)) else {
            self.context.notifications_mut().error("No record to copy");
            return;
        };
        let text = record.user_utterance.clone();
        match copy_with_provider(&text, self.clipboard.as_mut()) {
            Ok(()) => self.context.notifications_mut().success("Copied to clipboard"),
            Err(e) => self.context.notifications_mut().error(format!("Clipboard error: {}", e)),
        }
    }

    fn answer_confirm(&mut self, answer: bool) {
        if let Some(pending) = self.pending_confirms.pop_front() {
            let _ = pending.reply.send(answer);
        }
    }

    fn save(&mut self, id: RecordId) {
        // Validation failures are already reported by the context
        let Ok(update) = self.context.begin_save(id) else {
            return;
        };
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = gateway.update(id, &update).await;
            let _ = tx.send(AppEvent::SaveFinished { id, result });
        });
    }

    fn spawn_search(&self, request: SearchRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = api.list_records(request.query.as_deref()).await;
            let _ = tx.send(AppEvent::SearchLoaded { ticket: request.ticket, result });
        });
    }

    fn spawn_delete(&self, id: RecordId) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = gateway.delete(id).await;
            let _ = tx.send(AppEvent::DeleteFinished { id, result });
        });
    }

    fn spawn_dashboard_fetch(&mut self) {
        let ticket = self.context.begin_dashboard();
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = api.fetch_statistics().await;
            let _ = tx.send(AppEvent::StatsLoaded { ticket, result });
        });
    }

    fn spawn_report(&mut self) {
        self.context.notifications_mut().info("Downloading detailed report...");
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let dir = self.download_dir.clone();
        self.runtime.spawn(async move {
            let result = match api.fetch_detailed_report().await {
                Ok(report) => save_report(&dir, &report, Local::now().date_naive()),
                Err(e) => Err(e),
            };
            let _ = tx.send(AppEvent::ReportSaved(result));
        });
    }

    fn spawn_pdf(&mut self) {
        self.context.notifications_mut().info("Generating PDF report...");
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = api.request_pdf_report().await;
            let _ = tx.send(AppEvent::PdfReady(result));
        });
    }
}
