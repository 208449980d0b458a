use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap};

use super::charts::render_dashboard;
use super::layout::{AppLayout, HistoryLayout};
use super::sections::Section;
use crate::dashboard::DashboardView;
use crate::editing::{EditField, EditSession, EditSessions, EditState};
use crate::models::{Record, RecordId};
use crate::notifications::{Notification, Severity};
use crate::store::ListView;
use crate::utils::{escape_single_line, escape_text};

const MUTED: Color = Color::Rgb(113, 113, 122);
const TEXT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const INFO: Color = Color::Rgb(14, 165, 233);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Characters of the utterance shown per list row
const LIST_PREVIEW_CHARS: usize = 60;

/// Everything the renderer reads, borrowed from the app for one frame
pub struct RenderState<'a> {
    pub section: Section,
    pub query: &'a str,
    pub list: ListView<'a>,
    pub selected_idx: usize,
    pub sessions: &'a EditSessions,
    pub dashboard: Option<&'a DashboardView>,
    pub dashboard_loading: bool,
    pub notification: Option<&'a Notification>,
    pub now: Instant,
    pub confirm_prompt: Option<&'a str>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, layout.tabs_area, state.section);
    match state.section {
        Section::History => render_history(frame, layout.body_area, state),
        Section::Dashboard => {
            render_dashboard(frame, layout.body_area, state.dashboard, state.dashboard_loading)
        }
    }
    render_status_bar(frame, layout.status_area, state);

    if let Some(prompt) = state.confirm_prompt {
        render_confirm(frame, prompt);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", title))
}

fn render_tabs(frame: &mut Frame, area: Rect, section: Section) {
    let selected = match section {
        Section::History => 0,
        Section::Dashboard => 1,
    };
    let tabs = Tabs::new([Section::History.title(), Section::Dashboard.title()])
        .select(selected)
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &RenderState) {
    let layout = HistoryLayout::new(area);

    let query = Paragraph::new(escape_single_line(state.query))
        .style(Style::default().fg(TEXT))
        .block(panel("Search (Enter)"));
    frame.render_widget(query, layout.query_area);

    let displayed: &[Record] = match state.list {
        ListView::Records(records) => records,
        _ => &[],
    };
    let detached = state.sessions.detached_ids(displayed);

    match state.list {
        _ if !detached.is_empty() => render_records_list(
            frame,
            layout.list_area,
            displayed,
            &detached,
            state.selected_idx,
            state.sessions,
        ),
        ListView::Loading => render_placeholder(frame, layout.list_area, "Loading history...", MUTED),
        ListView::Error(message) => render_placeholder(
            frame,
            layout.list_area,
            &format!("Could not load history: {}", escape_single_line(message)),
            DANGER,
        ),
        ListView::Empty => render_placeholder(frame, layout.list_area, "No records found", MUTED),
        ListView::Records(records) => render_records_list(
            frame,
            layout.list_area,
            records,
            &detached,
            state.selected_idx,
            state.sessions,
        ),
    }

    let selected = displayed.get(state.selected_idx);
    let detached_selected = state
        .selected_idx
        .checked_sub(displayed.len())
        .and_then(|idx| detached.get(idx))
        .and_then(|id| state.sessions.get(*id));
    match (selected, detached_selected) {
        (Some(record), _) => match state.sessions.get(record.id) {
            Some(session) => render_edit_pane(frame, layout.detail_area, session, false),
            None => render_detail(frame, layout.detail_area, Some(record)),
        },
        (None, Some(session)) => render_edit_pane(frame, layout.detail_area, session, true),
        (None, None) => render_detail(frame, layout.detail_area, None),
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("Records"));
    frame.render_widget(paragraph, area);
}

fn render_records_list(
    frame: &mut Frame,
    area: Rect,
    records: &[Record],
    detached: &[RecordId],
    selected_idx: usize,
    sessions: &EditSessions,
) {
    let marker = |id: RecordId| match sessions.state(id) {
        Some(EditState::Editing) => "✎ ",
        Some(EditState::Saving) => "… ",
        None => "  ",
    };
    let preview = |text: &str| -> String {
        escape_single_line(text).chars().take(LIST_PREVIEW_CHARS).collect()
    };

    let listed = records.iter().map(|record| {
        format!(
            "{}#{} | {} | {}",
            marker(record.id),
            record.id,
            escape_single_line(&record.timestamp_label),
            preview(&record.user_utterance)
        )
    });
    let unlisted = detached.iter().map(|id| {
        let draft = sessions.get(*id).map(|s| s.draft(EditField::Utterance)).unwrap_or_default();
        format!("{}#{} | not in list | {}", marker(*id), id, preview(draft))
    });

    let items: Vec<ListItem> = listed
        .chain(unlisted)
        .enumerate()
        .map(|(idx, content)| {
            let style = if idx == selected_idx {
                Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let title = if detached.is_empty() {
        format!("Records ({})", records.len())
    } else {
        format!("Records ({}, {} unlisted edit)", records.len(), detached.len())
    };
    frame.render_widget(List::new(items).block(panel(&title)), area);
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(MUTED))
}

fn render_detail(frame: &mut Frame, area: Rect, record: Option<&Record>) {
    let content = if let Some(record) = record {
        let mut lines = vec![
            Line::from(vec![label("Record: "), Span::raw(format!("#{}", record.id))]),
            Line::from(vec![label("Date: "), Span::raw(escape_single_line(&record.timestamp_label))]),
            Line::from(vec![label("Command: "), Span::raw(escape_single_line(&record.command_label()))]),
            Line::from(""),
            Line::from(label("User said:")),
        ];
        lines.extend(escape_text(&record.user_utterance).lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(label("Assistant replied:")));
        lines.extend(
            escape_text(&record.assistant_response).lines().map(|l| Line::from(l.to_string())),
        );
        Text::from(lines)
    } else {
        Text::from("No record selected")
    };

    let paragraph = Paragraph::new(content).block(panel("Detail")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_edit_pane(frame: &mut Frame, area: Rect, session: &EditSession, unlisted: bool) {
    let saving = session.state() == EditState::Saving;
    let field_title = |field: EditField, name: &str| {
        let focused = session.focus() == field && !saving;
        let style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        Line::from(Span::styled(if focused { format!("> {}", name) } else { format!("  {}", name) }, style))
    };

    let mut heading = vec![label("Editing record "), Span::raw(format!("#{}", session.record_id()))];
    if unlisted {
        heading.push(Span::styled(" (no longer in the list)", Style::default().fg(DANGER)));
    }
    let mut lines = vec![
        Line::from(heading),
        Line::from(""),
        field_title(EditField::Utterance, "User said:"),
    ];
    lines.extend(
        escape_text(session.draft(EditField::Utterance)).lines().map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(field_title(EditField::Response, "Assistant replied:"));
    lines.extend(
        escape_text(session.draft(EditField::Response)).lines().map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(if saving {
        Line::from(Span::styled("Saving...", Style::default().fg(INFO)))
    } else {
        Line::from(label("Tab: switch field | Ctrl+S: save | Ctrl+D: delete | Esc: cancel"))
    });

    let paragraph = Paragraph::new(Text::from(lines)).block(panel("Edit")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(notification) = state.notification {
        let color = match notification.severity {
            Severity::Info => INFO,
            Severity::Success => ACCENT,
            Severity::Error => DANGER,
        };
        let mut style = Style::default().fg(color).bg(BAR_BG);
        if notification.is_fading(state.now) {
            style = style.add_modifier(Modifier::DIM);
        }
        (format!(" {} ", escape_single_line(&notification.message)), style)
    } else {
        let hints = match state.section {
            Section::History => {
                "Enter: search | Ctrl+E: edit | Ctrl+D: delete | Ctrl+Y: copy | Ctrl+P: PDF | Tab: dashboard | Ctrl+C: quit"
            }
            Section::Dashboard => {
                "Ctrl+R: refresh | Ctrl+O: download report | Tab: history | Ctrl+C: quit"
            }
        };
        (format!(" {} ", hints), Style::default().fg(TEXT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)])
        .split(vertical[1])[1]
}

fn render_confirm(frame: &mut Frame, prompt: &str) {
    let area = centered(frame.area(), 60, 5);
    let text = Text::from(vec![
        Line::from(escape_single_line(prompt)),
        Line::from(""),
        Line::from(label("y: confirm | n / Esc: cancel")),
    ]);
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DANGER))
                .title(" Confirm "),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::notifications::NotificationCenter;
    use crate::store::RecordStore;

    fn record(id: i64, utterance: &str) -> Record {
        Record {
            id,
            user_utterance: utterance.to_string(),
            assistant_response: "Reproduciendo en YouTube".to_string(),
            timestamp_label: "01/01/2025 10:00AM".to_string(),
            command_type: Some("reproduce".to_string()),
        }
    }

    fn state<'a>(list: ListView<'a>, sessions: &'a EditSessions) -> RenderState<'a> {
        RenderState {
            section: Section::History,
            query: "",
            list,
            selected_idx: 0,
            sessions,
            dashboard: None,
            dashboard_loading: false,
            notification: None,
            now: Instant::now(),
            confirm_prompt: None,
        }
    }

    fn draw(state: &RenderState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render_ui(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_records() {
        let records = [record(1, "pon musica"), record(2, "que hora es")];
        let sessions = EditSessions::new();

        let text = draw(&state(ListView::Records(&records), &sessions));
        assert!(text.contains("#1"));
        assert!(text.contains("que hora es"));
        assert!(text.contains("Reproduciendo en YouTube"));
        assert!(text.contains("Play"));
    }

    #[test]
    fn test_empty_loading_and_error_views_differ() {
        let sessions = EditSessions::new();

        let empty = draw(&state(ListView::Empty, &sessions));
        let loading = draw(&state(ListView::Loading, &sessions));
        let error = draw(&state(ListView::Error("timeout"), &sessions));

        assert!(empty.contains("No records found"));
        assert!(loading.contains("Loading history"));
        assert!(error.contains("Could not load history: timeout"));
        assert!(!empty.contains("Loading") && !empty.contains("Could not"));
    }

    #[test]
    fn test_escape_sequences_never_reach_the_screen() {
        let records = [record(1, "\x1b[2J\x1b]0;owned\x07hola\u{202e}")];
        let sessions = EditSessions::new();

        let text = draw(&state(ListView::Records(&records), &sessions));
        assert!(text.contains("hola"));
        assert!(!text.contains('\x1b'));
        assert!(!text.contains("owned"));
        assert!(!text.contains('\u{202e}'));
    }

    #[test]
    fn test_edit_pane_shows_drafts() {
        let mut store = RecordStore::new();
        store.replace(vec![record(1, "pon musica")]);
        let mut sessions = EditSessions::new();
        sessions.start(store.get(1).unwrap()).unwrap();
        sessions.get_mut(1).unwrap().set_draft(EditField::Utterance, "pon jazz").unwrap();

        let text = draw(&state(store.view(), &sessions));
        assert!(text.contains("Editing record #1"));
        assert!(text.contains("pon jazz"));
        assert!(text.contains("✎"));
    }

    #[test]
    fn test_edit_of_unlisted_record_stays_on_screen() {
        let mut store = RecordStore::new();
        store.replace(vec![record(1, "pon musica"), record(2, "que hora es")]);
        let mut sessions = EditSessions::new();
        sessions.start(store.get(1).unwrap()).unwrap();
        sessions.get_mut(1).unwrap().set_draft(EditField::Utterance, "pon jazz").unwrap();
        store.replace(vec![record(2, "que hora es")]);

        let mut s = state(store.view(), &sessions);
        s.selected_idx = 1;
        let text = draw(&s);
        assert!(text.contains("#1 | not in list | pon jazz"));
        assert!(text.contains("Editing record #1"));
        assert!(text.contains("Records (1, 1 unlisted edit)"));

        // The row survives even when the reload left nothing to show
        store.replace(Vec::new());
        let text = draw(&state(store.view(), &sessions));
        assert!(text.contains("#1 | not in list"));
        assert!(!text.contains("No records found"));
    }

    #[test]
    fn test_notification_in_status_bar() {
        let sessions = EditSessions::new();
        let mut center = NotificationCenter::new();
        center.error("Record #7 no longer exists");

        let mut s = state(ListView::Empty, &sessions);
        s.notification = center.current();
        assert!(draw(&s).contains("Record #7 no longer exists"));
    }

    #[test]
    fn test_confirm_dialog() {
        let sessions = EditSessions::new();
        let mut s = state(ListView::Empty, &sessions);
        s.confirm_prompt = Some("Delete record #3? This cannot be undone.");

        let text = draw(&s);
        assert!(text.contains("Delete record #3?"));
        assert!(text.contains("y: confirm"));
    }

    #[test]
    fn test_dashboard_section() {
        let sessions = EditSessions::new();
        let mut s = state(ListView::Empty, &sessions);
        s.section = Section::Dashboard;
        s.dashboard_loading = true;

        assert!(draw(&s).contains("Loading statistics"));
    }
}
