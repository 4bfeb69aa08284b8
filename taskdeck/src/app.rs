//! Application state and event handling.
//!
//! `App` holds only display state: the last published collection, the
//! input drafts, focus, and the current notice. It never mutates the
//! collection itself; key events translate into [`StoreCommand`]s and
//! state changes arrive back as [`StoreEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::task::{Task, TaskPatch};

use crate::bridge::{Mutation, StoreCommand, StoreEvent};
use crate::tasks::{EditDraft, Notice, SortKey};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// New-task form is focused (default).
    Form,
    /// Task list is focused.
    Tasks,
}

/// Which text field of a form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title line.
    Title,
    /// Description line.
    Description,
}

impl FormField {
    /// The other field (Tab toggles between the two).
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Title,
        }
    }
}

/// An open edit dialog: the draft plus its own field focus.
#[derive(Debug, Clone)]
pub struct EditState {
    /// Uncommitted copy of the task under edit.
    pub draft: EditDraft,
    /// Which draft field is receiving input.
    pub field: FormField,
    /// Validation message shown inside the dialog, if any.
    pub error: Option<String>,
}

/// Main application state.
pub struct App {
    /// Visible task sequence, as last published by the store task.
    pub tasks: Vec<Task>,
    /// Selected index into `tasks`.
    pub selected: usize,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Which form field is active when the form is focused.
    pub form_field: FormField,
    /// New-task title draft.
    pub title_input: String,
    /// New-task description draft.
    pub description_input: String,
    /// Cursor position within the active text field (character index).
    pub cursor_position: usize,
    /// Active sort key (mirrored for the status bar label).
    pub sort_key: SortKey,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Currently visible notice, if any.
    pub notice: Option<Notice>,
    /// Open edit dialog, if any. While open it captures all input.
    pub edit: Option<EditState>,
    /// Format string for task creation timestamps (chrono).
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an application with an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            selected: 0,
            focus: PanelFocus::Form,
            form_field: FormField::Title,
            title_input: String::new(),
            description_input: String::new(),
            cursor_position: 0,
            sort_key: SortKey::None,
            loading: false,
            notice: None,
            edit: None,
            timestamp_format: String::new(),
            should_quit: false,
        }
    }

    /// The currently selected task, if the list is non-empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Handle a key event, optionally producing a command for the
    /// store task.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        // Ctrl-C always quits, even with the edit dialog open.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // The edit dialog is modal.
        if self.edit.is_some() {
            return self.handle_edit_key(key);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                if self.notice.is_some() {
                    return Some(StoreCommand::DismissNotice);
                }
                self.should_quit = true;
                None
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus();
                None
            }
            _ => match self.focus {
                PanelFocus::Form => self.handle_form_key(key),
                PanelFocus::Tasks => self.handle_tasks_key(key),
            },
        }
    }

    /// Apply an event published by the store task.
    pub fn apply_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Collection(tasks) => {
                self.tasks = tasks;
                if self.selected >= self.tasks.len() {
                    self.selected = self.tasks.len().saturating_sub(1);
                }
            }
            StoreEvent::Loading(loading) => self.loading = loading,
            StoreEvent::Notice(notice) => self.notice = Some(notice),
            StoreEvent::NoticeCleared => self.notice = None,
            StoreEvent::Mutated(Mutation::Created) => {
                self.title_input.clear();
                self.description_input.clear();
                self.cursor_position = 0;
                self.form_field = FormField::Title;
            }
            StoreEvent::Mutated(Mutation::Updated) => {
                // The edit round-trip completed; close the dialog.
                self.edit = None;
            }
            StoreEvent::Mutated(Mutation::Removed) => {}
        }
    }

    /// Cycle focus: form title -> form description -> task list -> form.
    fn cycle_focus(&mut self) {
        match (self.focus, self.form_field) {
            (PanelFocus::Form, FormField::Title) => {
                self.form_field = FormField::Description;
                self.cursor_position = self.description_input.chars().count();
            }
            (PanelFocus::Form, FormField::Description) => {
                self.focus = PanelFocus::Tasks;
            }
            (PanelFocus::Tasks, _) => {
                self.focus = PanelFocus::Form;
                self.form_field = FormField::Title;
                self.cursor_position = self.title_input.chars().count();
            }
        }
    }

    /// Handle key event when the new-task form is focused.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Enter => Some(StoreCommand::Create {
                title: self.title_input.clone(),
                description: self.description_input.clone(),
            }),
            KeyCode::Char(c) => {
                self.enter_char(c);
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                let len = self.active_field().chars().count();
                if self.cursor_position < len {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.active_field().chars().count();
                None
            }
            _ => None,
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.selected_task().map(|task| {
                StoreCommand::Update {
                    id: task.id.clone(),
                    patch: TaskPatch::set_status(!task.status),
                }
            }),
            KeyCode::Char('p') => self.selected_task().map(|task| StoreCommand::Update {
                id: task.id.clone(),
                patch: TaskPatch::set_pinned(!task.pinned),
            }),
            KeyCode::Char('d') => self
                .selected_task()
                .map(|task| StoreCommand::Remove { id: task.id.clone() }),
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    let draft = EditDraft::new(task);
                    let cursor = task.title.chars().count();
                    self.edit = Some(EditState {
                        draft,
                        field: FormField::Title,
                        error: None,
                    });
                    self.cursor_position = cursor;
                }
                None
            }
            KeyCode::Char('s') => {
                self.sort_key = self.sort_key.next();
                Some(StoreCommand::SetSortKey(self.sort_key))
            }
            KeyCode::Char('r') => Some(StoreCommand::Load),
            _ => None,
        }
    }

    /// Handle key event while the edit dialog is open.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        let Some(edit) = self.edit.as_mut() else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                // Cancel: drop the draft, no remote call.
                self.edit = None;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                edit.field = edit.field.other();
                self.cursor_position = match edit.field {
                    FormField::Title => edit.draft.title.chars().count(),
                    FormField::Description => edit.draft.description.chars().count(),
                };
                None
            }
            KeyCode::Enter => match edit.draft.commit() {
                Ok(patch) => {
                    edit.error = None;
                    // Dialog stays open until the update round-trips.
                    Some(StoreCommand::Update {
                        id: edit.draft.id.clone(),
                        patch,
                    })
                }
                Err(e) => {
                    edit.error = Some(e.to_string());
                    None
                }
            },
            KeyCode::Char(c) => {
                let field = match edit.field {
                    FormField::Title => &mut edit.draft.title,
                    FormField::Description => &mut edit.draft.description,
                };
                let cursor = self.cursor_position.min(field.chars().count());
                let at = byte_index(field, cursor);
                field.insert(at, c);
                self.cursor_position = cursor + 1;
                None
            }
            KeyCode::Backspace => {
                let field = match edit.field {
                    FormField::Title => &mut edit.draft.title,
                    FormField::Description => &mut edit.draft.description,
                };
                if self.cursor_position > 0 {
                    let at = byte_index(field, self.cursor_position - 1);
                    if at < field.len() {
                        field.remove(at);
                        self.cursor_position -= 1;
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// The active form input string.
    fn active_field(&self) -> &str {
        match self.form_field {
            FormField::Title => &self.title_input,
            FormField::Description => &self.description_input,
        }
    }

    /// Insert a character at the cursor position of the active field.
    fn enter_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        let field = match self.form_field {
            FormField::Title => &mut self.title_input,
            FormField::Description => &mut self.description_input,
        };
        let cursor = cursor.min(field.chars().count());
        let at = byte_index(field, cursor);
        field.insert(at, c);
        self.cursor_position = cursor + 1;
    }

    /// Delete the character before the cursor in the active field.
    fn delete_char(&mut self) {
        let cursor = self.cursor_position;
        let field = match self.form_field {
            FormField::Title => &mut self.title_input,
            FormField::Description => &mut self.description_input,
        };
        if cursor > 0 {
            let at = byte_index(field, cursor - 1);
            if at < field.len() {
                field.remove(at);
                self.cursor_position = cursor - 1;
            }
        }
    }
}

/// Byte offset of the character at `char_idx`, clamped to the end of
/// the string. The cursor is a character index; `String::insert` and
/// `String::remove` want byte offsets on UTF-8 boundaries.
pub(crate) fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
