use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tzclock_core::domain::{CatalogSource, DayPeriod, ReadingSource, SyncState};
use super::model::{TuiModel, ViewMode};

/// Colors for one day-period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_period(period: Option<DayPeriod>) -> Self {
        match period {
            Some(DayPeriod::Sunrise) => Palette { accent: Color::LightYellow, border: Color::LightRed },
            Some(DayPeriod::Day) => Palette { accent: Color::Yellow, border: Color::Cyan },
            Some(DayPeriod::Sunset) => Palette { accent: Color::LightMagenta, border: Color::Red },
            Some(DayPeriod::Night) | None => Palette { accent: Color::LightBlue, border: Color::Blue },
        }
    }
}

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let size = frame.area();
        let palette = Palette::for_period(model.theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(0),    // Clock face
                Constraint::Length(3), // Key hints
            ])
            .split(size);

        Self::render_title_bar(model, frame, chunks[0], palette);
        Self::render_clock(model, frame, chunks[1], palette);
        Self::render_footer(frame, chunks[2]);

        match model.mode {
            ViewMode::Clock => {}
            ViewMode::ZonePicker => Self::render_zone_picker(model, frame, size, palette),
            ViewMode::Settings => Self::render_settings(model, frame, size, palette),
            ViewMode::Help => Self::render_help(frame, size, palette),
        }
    }

    fn render_title_bar(model: &TuiModel, frame: &mut Frame, area: Rect, palette: Palette) {
        let zone_text = match (model.current_entry(), model.frame.as_ref().and_then(|f| f.zone.as_ref())) {
            (Some(entry), _) => format!("{} {}", entry.display_flag(), entry.name),
            (None, Some(zone)) => zone.clone(),
            (None, None) => "Local time".to_string(),
        };

        let title = Paragraph::new(format!("tzclock - {}", zone_text))
            .style(Style::default().fg(Color::White).bg(palette.border))
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_clock(model: &TuiModel, frame: &mut Frame, area: Rect, palette: Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(model.theme.map(|p| p.label()).unwrap_or("clock"));

        let Some(clock) = &model.frame else {
            let waiting = Paragraph::new("Waiting for first tick...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(waiting, area);
            return;
        };

        let (sync_label, sync_color) = match (&clock.reading.source, clock.sync) {
            (ReadingSource::LocalMachine(_), _) => ("LOCAL", Color::Gray),
            (_, SyncState::Synced) => ("SYNCED", Color::Green),
            (_, SyncState::Unsynced) => ("UNSYNCED", Color::Yellow),
        };

        let mut detail = vec![
            Span::styled(clock.reading.offset_label(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(sync_label, Style::default().fg(sync_color).add_modifier(Modifier::BOLD)),
        ];
        if let ReadingSource::LocalMachine(reason) = &clock.reading.source {
            detail.push(Span::styled(format!(" ({})", reason), Style::default().fg(Color::DarkGray)));
        }

        let top_padding = area.height.saturating_sub(2 + 4) / 2;
        let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(
            clock.display.time_text(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(clock.display.date.clone()));
        lines.push(Line::from(detail));

        let face = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(face, area);
    }

    fn render_footer(frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let footer = Paragraph::new(Line::from(vec![
            key("z"), " zone  ".into(),
            key("t"), " 12/24h  ".into(),
            key("s"), " seconds  ".into(),
            key("b"), " sound  ".into(),
            key(","), " settings  ".into(),
            key("?"), " help  ".into(),
            key("q"), " quit".into(),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(footer, area);
    }

    fn render_zone_picker(model: &TuiModel, frame: &mut Frame, size: Rect, palette: Palette) {
        let area = Self::centered_rect(60, 70, size);
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter = Paragraph::new(format!("> {}", model.picker.filter))
            .block(Block::default().borders(Borders::ALL).title("Filter"));
        frame.render_widget(filter, chunks[0]);

        let items: Vec<ListItem> = model
            .visible_zones()
            .into_iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", entry.display_flag())),
                    Span::styled(entry.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", entry.zone), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        let title = match (model.zones_loaded, model.catalog.source) {
            (false, _) => "Timezones (loading...)",
            (true, CatalogSource::Server) => "Timezones",
            (true, CatalogSource::Fallback) => "Timezones (offline list)",
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border))
                    .title(title),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if model.highlighted_zone().is_some() {
            state.select(Some(model.picker.cursor));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_settings(model: &TuiModel, frame: &mut Frame, size: Rect, palette: Palette) {
        let area = Self::centered_rect(50, 40, size);
        frame.render_widget(Clear, area);

        let on_off = |on: bool| if on { "on" } else { "off" };
        let lines = vec![
            Line::from(Span::styled("Settings", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("  t  24-hour clock   [{}]", on_off(model.settings.is_24_hour))),
            Line::from(format!("  s  show seconds    [{}]", on_off(model.settings.seconds_visible))),
            Line::from(format!("  b  tick sound      [{}]", on_off(model.settings.tick_sound))),
            Line::from(""),
            Line::from("  Esc to close"),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(panel, area);
    }

    fn render_help(frame: &mut Frame, size: Rect, palette: Palette) {
        let area = Self::centered_rect(60, 60, size);
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(Span::styled("Help", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("  z / Enter   choose a timezone"),
            Line::from("  t           toggle 12/24-hour format"),
            Line::from("  s           toggle seconds"),
            Line::from("  b           toggle tick sound"),
            Line::from("  r           reload timezone list"),
            Line::from("  ,           settings"),
            Line::from("  q / Esc     quit"),
            Line::from(""),
            Line::from("SYNCED: ticking from server time"),
            Line::from("UNSYNCED: server unreachable, using timezone rules"),
            Line::from("LOCAL: showing this machine's time"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(help, area);
    }

    /// Centered rectangle taking the given percentages of `area`
    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1])[1]
    }
}
