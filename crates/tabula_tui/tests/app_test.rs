//! Key-driven tests of the TUI state machine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use tabula_core::SqlValue;
use tabula_database::{DriverCall, ScriptedDriver, Session};
use tabula_tui::{App, AppMode, StatusLevel, ui};

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn driver() -> ScriptedDriver {
    ScriptedDriver::new()
        .on_query("sys.databases", &["name"], vec![vec![text("Library")]])
        .on_query("SCHEMATA", &["SCHEMA_NAME"], vec![vec![text("dbo")]])
        .on_query(
            "INFORMATION_SCHEMA.TABLES",
            &["TABLE_NAME", "TABLE_TYPE"],
            vec![
                vec![text("Books"), text("BASE TABLE")],
                vec![text("Loans"), text("BASE TABLE")],
            ],
        )
        .on_query(
            "INFORMATION_SCHEMA.COLUMNS",
            &["COLUMN_NAME", "DATA_TYPE", "IS_NULLABLE", "COLUMN_DEFAULT"],
            vec![
                vec![text("BookID"), text("int"), text("NO"), SqlValue::Null],
                vec![text("Title"), text("nvarchar"), text("NO"), SqlValue::Null],
            ],
        )
        .with_count(150)
        .on_query(
            "OFFSET",
            &["BookID", "Title"],
            vec![
                vec![SqlValue::Int(1), text("Dune")],
                vec![SqlValue::Int(2), text("Emma")],
            ],
        )
}

fn app() -> App<ScriptedDriver> {
    let mut app = App::new(Session::new(driver(), 100), "localhost:1433");
    app.start();
    app.session_mut().driver_mut().clear_calls();
    app
}

fn press(app: &mut App<ScriptedDriver>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<ScriptedDriver>, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn executed(app: &App<ScriptedDriver>) -> Vec<(String, Vec<SqlValue>)> {
    app.session()
        .driver()
        .calls()
        .iter()
        .filter_map(|call| match call {
            DriverCall::Execute { sql, params } => Some((sql.clone(), params.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_start_selects_first_table() {
    let app = app();
    assert_eq!(app.title(), "localhost:1433 - Library.dbo.Books");
    assert_eq!(app.status.level, StatusLevel::Info);
}

#[test]
fn test_row_selection_stays_on_page() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected_index, 1);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected_index, 0);
}

#[test]
fn test_page_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.session().window().page(), 2);
    assert_eq!(app.status.text, "Page 2 of 2 | 150 records");
    press(&mut app, KeyCode::Right);
    assert_eq!(app.session().window().page(), 2);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.session().window().page(), 1);
}

#[test]
fn test_quick_filter_flow() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.mode, AppMode::QuickFilter);
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "un");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.status.text, "Filter: [Title] LIKE '%un%'");

    press(&mut app, KeyCode::Char('c'));
    assert!(app.session().filter().is_empty());
}

#[test]
fn test_blank_quick_filter_warns_and_stays_open() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::QuickFilter);
    assert_eq!(app.status.level, StatusLevel::Warning);
    assert_eq!(
        app.status.to_string(),
        "Warning: Please select a column and enter a filter value."
    );
}

#[test]
fn test_advanced_filter_operator_cycle() {
    let mut app = app();
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.mode, AppMode::AdvancedFilter);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    type_text(&mut app, "1");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.session().filter().describe(), "[BookID] > '1'");
}

#[test]
fn test_advanced_filter_without_values_keeps_filter() {
    let mut app = app();
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert!(app.session().filter().is_empty());
    assert!(app.session().driver().calls().is_empty());
}

#[test]
fn test_add_record_flow() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.mode, AppMode::AddRecord);
    assert_eq!(app.record_form().unwrap().fields()[1].label, "Title (nvarchar)");

    type_text(&mut app, "3");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Ulysses");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.status.text, "Record added successfully.");
    assert_eq!(
        executed(&app),
        vec![(
            "INSERT INTO [dbo].[Books] ([BookID], [Title]) VALUES (@P1, @P2)".to_string(),
            vec![text("3"), text("Ulysses")],
        )]
    );
}

#[test]
fn test_edit_without_changes_warns() {
    let mut app = app();
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.mode, AppMode::EditRecord);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.status.to_string(), "Warning: No changes to save.");
    assert!(executed(&app).is_empty());
}

#[test]
fn test_failed_edit_keeps_form_and_reports_error() {
    let mut app = app();
    let failing = app
        .session()
        .driver()
        .clone()
        .on_execute_error("UPDATE", "Cannot insert the value NULL into column 'Title'.");
    *app.session_mut().driver_mut() = failing;

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::EditRecord);
    assert_eq!(
        app.status.to_string(),
        "Error: Cannot insert the value NULL into column 'Title'."
    );
    let calls = app.session().driver().calls();
    assert!(calls.contains(&DriverCall::Rollback));
    assert!(!calls.contains(&DriverCall::Commit));
}

#[test]
fn test_delete_requires_confirmation() {
    let mut app = app();
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.mode, AppMode::ConfirmDelete);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.status.text, "Delete cancelled");
    assert!(executed(&app).is_empty());

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.status.text, "Record deleted successfully.");
    assert_eq!(
        executed(&app),
        vec![(
            "DELETE FROM [dbo].[Books] WHERE [BookID] = @P1".to_string(),
            vec![text("1")],
        )]
    );
}

#[test]
fn test_table_picker_switches_table() {
    let mut app = app();
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.mode, AppMode::PickTable);
    assert_eq!(app.picker().labels()[0], "Books (BASE TABLE)");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.session().table().unwrap().table(), "Loans");
    assert_eq!(app.status.text, "Showing Library.dbo.Loans");
}

#[test]
fn test_actions_without_table_warn() {
    let mut app = App::new(Session::new(ScriptedDriver::new(), 100), "nowhere");
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.mode, AppMode::Browse);
    assert_eq!(app.status.to_string(), "Warning: Please select a table first.");

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.status.level, StatusLevel::Warning);
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.mode, AppMode::Help);
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.mode, AppMode::Browse);
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_draw_renders_grid_and_pagination() {
    let app = app();
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| ui::draw(f, &app)).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Library.dbo.Books"));
    assert!(screen.contains("Dune"));
    assert!(screen.contains("Page 1 of 2 | 150 records"));
}

#[test]
fn test_committed_insert_with_failed_refresh_closes_form() {
    let mut app = app();
    let failing = app
        .session()
        .driver()
        .clone()
        .on_query_error("COUNT(*)", "timeout");
    *app.session_mut().driver_mut() = failing;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "3");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Ulysses");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Browse);
    assert!(app.record_form().is_none());
    assert_eq!(app.status.level, StatusLevel::Warning);
    assert_eq!(
        app.status.text,
        "Record added successfully. Refresh failed: timeout"
    );

    press(&mut app, KeyCode::Enter);
    assert_eq!(executed(&app).len(), 1);
}

#[test]
fn test_failed_table_switch_leaves_nothing_to_delete() {
    let mut app = app();
    let failing = app
        .session()
        .driver()
        .clone()
        .on_query_error("[Loans]", "permission denied");
    *app.session_mut().driver_mut() = failing;

    press(&mut app, KeyCode::Char('t'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status.to_string(), "Error: permission denied");

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));
    assert!(executed(&app).is_empty());
}
