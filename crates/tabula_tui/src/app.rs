//! Application state and key handling.

use crate::{FilterForm, Picker, QuickFilter, RecordForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabula_core::RecordValues;
use tabula_database::Session;
use tabula_error::{DatabaseError, DatabaseResult};
use tabula_interface::Driver;
use tracing::{debug, info, instrument, warn};

/// What the screen is showing and which keys apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AppMode {
    /// Grid of the current page
    Browse,
    /// Choosing a database
    #[strum(serialize = "Select Database")]
    PickDatabase,
    /// Choosing a schema
    #[strum(serialize = "Select Schema")]
    PickSchema,
    /// Choosing a table or view
    #[strum(serialize = "Select Table")]
    PickTable,
    /// Typing a single-column filter
    #[strum(serialize = "Quick Filter")]
    QuickFilter,
    /// Per-column operator/value filter
    #[strum(serialize = "Advanced Filter")]
    AdvancedFilter,
    /// New row form
    #[strum(serialize = "Add Record")]
    AddRecord,
    /// Existing row form
    #[strum(serialize = "Edit Record")]
    EditRecord,
    /// Waiting for `y` to delete
    #[strum(serialize = "Confirm Delete")]
    ConfirmDelete,
    /// Key reference
    Help,
}

/// Severity of the status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum StatusLevel {
    /// Plain information
    Info,
    /// A precondition the user can fix
    Warning,
    /// A failed operation
    Error,
}

/// The status bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Severity
    pub level: StatusLevel,
    /// Message text
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            StatusLevel::Info => write!(f, "{}", self.text),
            level => write!(f, "{}: {}", level, self.text),
        }
    }
}

/// Application state.
pub struct App<D: Driver> {
    session: Session<D>,
    /// Where we are connected, shown in the header
    pub connection_label: String,
    /// Current mode
    pub mode: AppMode,
    /// Highlighted row on the current page
    pub selected_index: usize,
    /// Status bar message
    pub status: Status,
    /// Set when the user asks to quit
    pub should_quit: bool,
    picker: Picker,
    quick_filter: Option<QuickFilter>,
    filter_form: Option<FilterForm>,
    record_form: Option<RecordForm>,
    pending_delete: Option<RecordValues>,
}

impl<D: Driver> App<D> {
    /// Wraps a session. Nothing is loaded until [`App::start`].
    pub fn new(session: Session<D>, connection_label: impl Into<String>) -> Self {
        Self {
            session,
            connection_label: connection_label.into(),
            mode: AppMode::Browse,
            selected_index: 0,
            status: Status::info("Ready"),
            should_quit: false,
            picker: Picker::default(),
            quick_filter: None,
            filter_form: None,
            record_form: None,
            pending_delete: None,
        }
    }

    /// Loads the database list and the first table. Failures land in the
    /// status bar.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        match self.session.load_databases() {
            Ok(()) => self.status = Status::info(format!("Connected to {}", self.connection_label)),
            Err(e) => self.report(e),
        }
    }

    /// The browsing session.
    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    /// The browsing session, mutably.
    pub fn session_mut(&mut self) -> &mut Session<D> {
        &mut self.session
    }

    /// The open picker, meaningful in the pick modes.
    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    /// The quick filter being typed.
    pub fn quick_filter(&self) -> Option<&QuickFilter> {
        self.quick_filter.as_ref()
    }

    /// The advanced filter form.
    pub fn filter_form(&self) -> Option<&FilterForm> {
        self.filter_form.as_ref()
    }

    /// The add/edit form.
    pub fn record_form(&self) -> Option<&RecordForm> {
        self.record_form.as_ref()
    }

    /// The add/edit form, mutably.
    pub fn record_form_mut(&mut self) -> Option<&mut RecordForm> {
        self.record_form.as_mut()
    }

    /// Header text: connection plus `database.schema.table`.
    pub fn title(&self) -> String {
        match self.session.table() {
            Some(table) => format!("{} - {}", self.connection_label, table),
            None => self.connection_label.clone(),
        }
    }

    /// Routes a key press to the handler for the current mode.
    #[instrument(skip(self, key), fields(mode = %self.mode, code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            AppMode::Browse => self.handle_browse(key),
            AppMode::PickDatabase | AppMode::PickSchema | AppMode::PickTable => {
                self.handle_picker(key)
            }
            AppMode::QuickFilter => self.handle_quick_filter(key),
            AppMode::AdvancedFilter => self.handle_filter_form(key),
            AppMode::AddRecord | AppMode::EditRecord => self.handle_record_form(key),
            AppMode::ConfirmDelete => self.handle_confirm_delete(key),
            AppMode::Help => self.mode = AppMode::Browse,
        }
    }

    fn handle_browse(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.mode = AppMode::Help,
            KeyCode::Down | KeyCode::Char('j') => self.select_next_row(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1)
            }
            KeyCode::Right | KeyCode::Char('n') => {
                let moved = self.session.next_page();
                self.after_page_change(moved);
            }
            KeyCode::Left | KeyCode::Char('p') => {
                let moved = self.session.prev_page();
                self.after_page_change(moved);
            }
            KeyCode::Char('d') => self.open_database_picker(),
            KeyCode::Char('s') => self.open_schema_picker(),
            KeyCode::Char('t') => self.open_table_picker(),
            KeyCode::Char('/') => self.open_quick_filter(),
            KeyCode::Char('f') => self.open_filter_form(),
            KeyCode::Char('c') => {
                let result = self.session.clear_filter();
                self.finish(result.map(|()| "Filter cleared".to_string()));
            }
            KeyCode::Char('r') => {
                let result = self.session.refresh();
                self.finish(result.map(|()| "Data refreshed".to_string()));
            }
            KeyCode::Char('a') => match self.session.blank_record() {
                Ok(_) => {
                    self.record_form = Some(RecordForm::add(self.session.columns()));
                    self.mode = AppMode::AddRecord;
                }
                Err(e) => self.report(e),
            },
            KeyCode::Char('e') => match self.session.record_at(self.selected_index) {
                Ok(record) => {
                    self.record_form = Some(RecordForm::edit(self.session.columns(), record));
                    self.mode = AppMode::EditRecord;
                }
                Err(e) => self.report(e),
            },
            KeyCode::Char('x') => match self.session.record_at(self.selected_index) {
                Ok(record) => {
                    self.pending_delete = Some(record);
                    self.mode = AppMode::ConfirmDelete;
                }
                Err(e) => self.report(e),
            },
            _ => {}
        }
    }

    fn handle_picker(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = AppMode::Browse,
            KeyCode::Down | KeyCode::Char('j') => self.picker.next(),
            KeyCode::Up | KeyCode::Char('k') => self.picker.previous(),
            KeyCode::Enter => {
                let Some(value) = self.picker.value().map(str::to_string) else {
                    self.mode = AppMode::Browse;
                    return;
                };
                let result = match self.mode {
                    AppMode::PickDatabase => self.session.select_database(&value),
                    AppMode::PickSchema => self.session.select_schema(&value),
                    _ => self.session.select_table(&value),
                };
                self.mode = AppMode::Browse;
                self.selected_index = 0;
                let label = self
                    .session
                    .table()
                    .map(ToString::to_string)
                    .unwrap_or(value);
                self.finish(result.map(|()| format!("Showing {}", label)));
            }
            _ => {}
        }
    }

    fn handle_quick_filter(&mut self, key: KeyEvent) {
        let Some(quick) = self.quick_filter.as_mut() else {
            self.mode = AppMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.quick_filter = None;
                self.mode = AppMode::Browse;
            }
            KeyCode::Tab => quick.cycle_column(true),
            KeyCode::BackTab => quick.cycle_column(false),
            KeyCode::Enter => {
                let (column, value) = (quick.column().to_string(), quick.value.clone());
                match self.session.apply_quick_filter(&column, &value) {
                    Ok(()) => {
                        self.quick_filter = None;
                        self.mode = AppMode::Browse;
                        self.selected_index = 0;
                        self.status = Status::info(format!(
                            "Filter: {}",
                            self.session.filter().describe()
                        ));
                    }
                    Err(e) => self.report(e),
                }
            }
            _ => {
                crate::form::edit_text(&mut quick.value, key);
            }
        }
    }

    fn handle_filter_form(&mut self, key: KeyEvent) {
        let Some(form) = self.filter_form.as_mut() else {
            self.mode = AppMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.filter_form = None;
                self.mode = AppMode::Browse;
            }
            KeyCode::Down | KeyCode::Tab => form.move_focus(true),
            KeyCode::Up | KeyCode::BackTab => form.move_focus(false),
            KeyCode::Right => form.cycle_operator(true),
            KeyCode::Left => form.cycle_operator(false),
            KeyCode::Enter => {
                let predicates = form.predicates();
                match self.session.apply_filters(predicates) {
                    Ok(applied) => {
                        self.filter_form = None;
                        self.mode = AppMode::Browse;
                        self.status = if applied {
                            self.selected_index = 0;
                            Status::info(format!("Filter: {}", self.session.filter().describe()))
                        } else {
                            Status::info("No filter values entered; filter unchanged")
                        };
                    }
                    Err(e) => self.report(e),
                }
            }
            _ => {
                form.edit_focused(key);
            }
        }
    }

    fn handle_record_form(&mut self, key: KeyEvent) {
        let Some(form) = self.record_form.as_mut() else {
            self.mode = AppMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.record_form = None;
                self.mode = AppMode::Browse;
            }
            KeyCode::Down | KeyCode::Tab => form.move_focus(true),
            KeyCode::Up | KeyCode::BackTab => form.move_focus(false),
            KeyCode::Enter => self.save_record(),
            _ => {
                form.edit_focused(key);
            }
        }
    }

    fn save_record(&mut self) {
        let Some(form) = self.record_form.as_ref() else {
            return;
        };
        let outcome = form.values().and_then(|edited| match form.original() {
            Some(original) => self
                .session
                .update_record(original, &edited)
                .map(|_| "Record updated successfully."),
            None => self
                .session
                .insert_record(&edited)
                .map(|_| "Record added successfully."),
        });

        match outcome {
            Ok(message) => {
                self.record_form = None;
                self.mode = AppMode::Browse;
                self.clamp_selection();
                self.committed(message);
            }
            Err(e) if e.kind.is_warning() => {
                self.record_form = None;
                self.mode = AppMode::Browse;
                self.report(e);
            }
            // Keep the form open so the input can be corrected.
            Err(e) => self.report(e),
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent) {
        let record = self.pending_delete.take();
        self.mode = AppMode::Browse;
        match (key.code, record) {
            (KeyCode::Char('y') | KeyCode::Char('Y'), Some(record)) => {
                match self.session.delete_record(&record) {
                    Ok(_) => {
                        self.clamp_selection();
                        self.committed("Record deleted successfully.");
                    }
                    Err(e) => self.report(e),
                }
            }
            _ => self.status = Status::info("Delete cancelled"),
        }
    }

    fn open_database_picker(&mut self) {
        let databases = self.session.databases().to_vec();
        if databases.is_empty() {
            self.warn("No databases available.");
            return;
        }
        self.picker = Picker::new("Databases", databases, self.session.database());
        self.mode = AppMode::PickDatabase;
    }

    fn open_schema_picker(&mut self) {
        let schemas = self.session.schemas().to_vec();
        if schemas.is_empty() {
            self.warn("Please select a database first.");
            return;
        }
        self.picker = Picker::new("Schemas", schemas, self.session.schema());
        self.mode = AppMode::PickSchema;
    }

    fn open_table_picker(&mut self) {
        let tables = self.session.tables();
        if tables.is_empty() {
            self.warn("Please select a schema first.");
            return;
        }
        let labels = tables.iter().map(ToString::to_string).collect();
        let values = tables.iter().map(|t| t.name.clone()).collect();
        let current = self.session.table().map(|t| t.table().as_str());
        self.picker = Picker::labelled("Tables", labels, values, current);
        self.mode = AppMode::PickTable;
    }

    fn open_quick_filter(&mut self) {
        if self.session.table().is_none() {
            self.warn_no_table();
            return;
        }
        self.quick_filter = Some(QuickFilter::new(self.session.columns()));
        self.mode = AppMode::QuickFilter;
    }

    fn open_filter_form(&mut self) {
        if self.session.table().is_none() {
            self.warn_no_table();
            return;
        }
        self.filter_form = Some(FilterForm::new(
            self.session.columns(),
            self.session.filter(),
        ));
        self.mode = AppMode::AdvancedFilter;
    }

    fn select_next_row(&mut self) {
        let rows = self.session.result().rows().len();
        if self.selected_index + 1 < rows {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.session.result().rows().len();
        self.selected_index = self.selected_index.min(rows.saturating_sub(1));
    }

    fn after_page_change(&mut self, moved: DatabaseResult<bool>) {
        match moved {
            Ok(true) => {
                self.selected_index = 0;
                self.status = Status::info(self.session.window().to_string());
            }
            Ok(false) => debug!("Already at the edge of the result"),
            Err(e) => self.report(e),
        }
    }

    fn finish(&mut self, result: DatabaseResult<String>) {
        match result {
            Ok(message) => {
                info!(%message, "Operation complete");
                self.clamp_selection();
                self.status = Status::info(message);
            }
            Err(e) => self.report(e),
        }
    }

    /// Reports a committed mutation, noting a failed refresh separately.
    fn committed(&mut self, message: &str) {
        info!(%message, "Mutation complete");
        match self.session.take_refresh_error() {
            Some(e) => {
                self.warn(&format!("{message} Refresh failed: {}", e.message()));
            }
            None => self.status = Status::info(message),
        }
    }

    fn warn_no_table(&mut self) {
        self.warn("Please select a table first.");
    }

    fn warn(&mut self, text: &str) {
        self.status = Status {
            level: StatusLevel::Warning,
            text: text.to_string(),
        };
    }

    /// Puts `error` in the status bar: warnings for fixable preconditions,
    /// errors for everything the driver rejected.
    fn report(&mut self, error: DatabaseError) {
        let level = if error.kind.is_warning() {
            StatusLevel::Warning
        } else {
            warn!(error = %error, "Operation failed");
            StatusLevel::Error
        };
        self.status = Status {
            level,
            text: error.message(),
        };
    }
}
