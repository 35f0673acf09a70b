//! UI rendering for TUI.

use crate::{App, AppMode, StatusLevel, column_widths};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};
use tabula_interface::Driver;

const HELP: &[(&str, &str)] = &[
    ("↑/↓", "Select row"),
    ("←/→, p/n", "Previous / next page"),
    ("d / s / t", "Pick database / schema / table"),
    ("/", "Quick filter (LIKE)"),
    ("f", "Advanced filter"),
    ("c", "Clear filter"),
    ("r", "Refresh"),
    ("a / e / x", "Add / edit / delete record"),
    ("?", "This help"),
    ("q", "Quit"),
];

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw<D: Driver>(f: &mut Frame, app: &App<D>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Pagination
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_pagination(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::Browse => {}
        AppMode::PickDatabase | AppMode::PickSchema | AppMode::PickTable => {
            draw_picker(f, app, chunks[1])
        }
        AppMode::QuickFilter => draw_quick_filter(f, app, chunks[1]),
        AppMode::AdvancedFilter => draw_filter_form(f, app, chunks[1]),
        AppMode::AddRecord | AppMode::EditRecord => draw_record_form(f, app, chunks[1]),
        AppMode::ConfirmDelete => draw_confirm_delete(f, chunks[1]),
        AppMode::Help => draw_help(f, chunks[1]),
    }
}

fn popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

fn focused(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Draw the header.
#[tracing::instrument(skip_all)]
fn draw_header<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let header = Paragraph::new(format!("Tabula - {}", app.title()))
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Draw the result grid with auto-sized columns.
#[tracing::instrument(skip_all)]
fn draw_grid<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let result = app.session().result();
    let cells = result.display_rows();
    let widths = column_widths(result.columns(), &cells);

    let header = Row::new(result.columns().clone())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = cells.into_iter().map(Row::new).collect();

    let title = match app.session().filter().is_empty() {
        true => "Data".to_string(),
        false => format!("Data (filtered: {})", app.session().filter().describe()),
    };

    let table = Table::new(rows, widths.into_iter().map(Constraint::Length))
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(table, area, &mut state);
}

/// Draw the `Page X of Y | N records` line.
fn draw_pagination<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let window = app.session().window();
    let mut spans = vec![Span::raw(window.to_string())];
    if window.has_previous() {
        spans.push(Span::styled("  ← prev", Style::default().fg(Color::DarkGray)));
    }
    if window.has_next() {
        spans.push(Span::styled("  next →", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Draw the status bar with help text.
#[tracing::instrument(skip_all)]
fn draw_status_bar<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let help_text = match app.mode {
        AppMode::Browse => "↑↓: Row | ←→: Page | d/s/t: Pick | /: Filter | f: Advanced | a/e/x: Edit | ?: Help | q: Quit",
        AppMode::PickDatabase | AppMode::PickSchema | AppMode::PickTable => {
            "↑↓: Navigate | Enter: Select | Esc: Back"
        }
        AppMode::QuickFilter => "Tab: Column | Enter: Apply | Esc: Cancel",
        AppMode::AdvancedFilter => "↑↓: Column | ←→: Operator | Enter: Apply | Esc: Cancel",
        AppMode::AddRecord | AppMode::EditRecord => "Tab/↑↓: Field | Enter: Save | Esc: Cancel",
        AppMode::ConfirmDelete => "y: Delete | any other key: Cancel",
        AppMode::Help => "Any key: Back",
    };

    let color = match app.status.level {
        StatusLevel::Info => Color::Gray,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(app.status.to_string(), Style::default().fg(color)),
        Span::styled(format!(" | {}", help_text), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

/// Draw the database/schema/table picker.
#[tracing::instrument(skip_all)]
fn draw_picker<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let picker = app.picker();
    let area = popup(area, 50, 70);
    let items: Vec<ListItem> = picker
        .labels()
        .iter()
        .map(|label| ListItem::new(label.as_str()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(picker.title()),
        )
        .highlight_style(focused(true));
    let mut state = ListState::default().with_selected(Some(picker.selected()));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

/// Draw the quick filter prompt.
fn draw_quick_filter<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let Some(quick) = app.quick_filter() else {
        return;
    };
    let area = popup(area, 60, 30);
    let text = vec![
        Line::from(vec![
            Span::raw("Column: "),
            Span::styled(quick.column(), focused(true)),
        ]),
        Line::from(format!("Contains: {}_", quick.value)),
    ];
    let prompt = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Quick Filter"),
    );
    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Draw the advanced filter form.
#[tracing::instrument(skip_all)]
fn draw_filter_form<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let Some(form) = app.filter_form() else {
        return;
    };
    let area = popup(area, 70, 80);
    let rows: Vec<Row> = form
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                row.column.clone(),
                row.operator.to_string(),
                row.value.clone(),
            ])
            .style(focused(i == form.focus()))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Column", "Op", "Value"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Advanced Filter"),
    );
    f.render_widget(Clear, area);
    f.render_widget(table, area);
}

/// Draw the add/edit form.
#[tracing::instrument(skip_all)]
fn draw_record_form<D: Driver>(f: &mut Frame, app: &App<D>, area: Rect) {
    let Some(form) = app.record_form() else {
        return;
    };
    let area = popup(area, 70, 90);
    let lines: Vec<Line> = form
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            Line::from(vec![
                Span::styled(format!("{:<30}", field.label), Style::default().fg(Color::Yellow)),
                Span::styled(field.value.clone(), focused(i == form.focus())),
            ])
        })
        .collect();
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.mode.to_string()),
    );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn draw_confirm_delete(f: &mut Frame, area: Rect) {
    let area = popup(area, 50, 20);
    let prompt = Paragraph::new("Are you sure you want to delete this record? (y/N)")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete"),
        )
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let area = popup(area, 60, 70);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();
    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
