use ratatui::widgets::ListState;

use crate::domain::{Record, RecordId, ResourceKind, ResourceSpec};
use crate::form::FormState;
use crate::schema::{FormSchema, SchemaMode, login_schema, resolve};

use super::input::InputMode;

/// The sign-in form.
pub struct LoginScreen {
    pub schema: FormSchema,
    pub form: FormState,
}

impl LoginScreen {
    pub fn new() -> Self {
        let schema = login_schema();
        let form = FormState::from_schema(&schema);
        Self { schema, form }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// A collection view: the fetched records plus row selection state.
pub struct ListScreen {
    pub resource: ResourceKind,
    pub spec: &'static ResourceSpec,
    pub records: Vec<Record>,
    pub rows: ListState,
    pub loading: bool,
}

impl ListScreen {
    pub fn new(resource: ResourceKind) -> Self {
        Self {
            resource,
            spec: resource.spec(),
            records: Vec::new(),
            rows: ListState::default(),
            loading: true,
        }
    }

    /// Installs freshly fetched records, keeping the selection in bounds.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.loading = false;
        let selection = if self.records.is_empty() {
            None
        } else {
            Some(
                self.rows
                    .selected()
                    .unwrap_or(0)
                    .min(self.records.len() - 1),
            )
        };
        self.rows.select(selection);
    }

    pub fn selected(&self) -> Option<&Record> {
        self.rows
            .selected()
            .and_then(|index| self.records.get(index))
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected().and_then(|record| record.id)
    }

    pub fn row_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let next = self
            .rows
            .selected()
            .map_or(0, |index| (index + 1).min(self.records.len() - 1));
        self.rows.select(Some(next));
    }

    pub fn row_prev(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let prev = self.rows.selected().map_or(0, |index| index.saturating_sub(1));
        self.rows.select(Some(prev));
    }
}

/// A create or edit form for one record.
pub struct EditorScreen {
    pub resource: ResourceKind,
    pub spec: &'static ResourceSpec,
    pub record_id: Option<RecordId>,
    pub schema: FormSchema,
    pub form: FormState,
    /// True while the existing record is still being fetched.
    pub loading: bool,
}

impl EditorScreen {
    pub fn create(resource: ResourceKind) -> Self {
        let spec = resource.spec();
        let schema = resolve(spec, None);
        let form = FormState::from_schema(&schema);
        Self {
            resource,
            spec,
            record_id: None,
            schema,
            form,
            loading: false,
        }
    }

    pub fn edit(resource: ResourceKind, id: RecordId) -> Self {
        let spec = resource.spec();
        let schema = resolve(spec, Some(id));
        let form = FormState::from_schema(&schema);
        Self {
            resource,
            spec,
            record_id: Some(id),
            schema,
            form,
            loading: true,
        }
    }

    /// Installs the fetched record as the editing baseline and unlocks the
    /// form.
    pub fn seed(&mut self, record: &Record) {
        self.form = FormState::from_record(&self.schema, record);
        self.loading = false;
    }

    pub fn heading(&self) -> String {
        match self.schema.mode {
            SchemaMode::Create => format!("Create New {}", self.spec.singular),
            SchemaMode::Edit => format!("Update {}", self.spec.singular),
        }
    }
}

pub enum Screen {
    Login(LoginScreen),
    List(ListScreen),
    Editor(EditorScreen),
}

impl Screen {
    pub fn input_mode(&self) -> InputMode {
        match self {
            Screen::List(_) => InputMode::List,
            Screen::Login(_) | Screen::Editor(_) => InputMode::Form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, name: &str) -> Record {
        Record::from_value(
            ResourceKind::Users.spec(),
            &json!({"id": id, "name": name}),
        )
    }

    #[test]
    fn fresh_lists_select_the_first_row() {
        let mut screen = ListScreen::new(ResourceKind::Users);
        assert!(screen.loading);
        screen.set_records(vec![record(1, "Ada"), record(2, "Max")]);
        assert!(!screen.loading);
        assert_eq!(screen.selected_id(), Some(1));
    }

    #[test]
    fn refetch_clamps_the_selection() {
        let mut screen = ListScreen::new(ResourceKind::Users);
        screen.set_records(vec![record(1, "Ada"), record(2, "Max"), record(3, "Jo")]);
        screen.row_next();
        screen.row_next();
        assert_eq!(screen.selected_id(), Some(3));
        screen.set_records(vec![record(1, "Ada")]);
        assert_eq!(screen.selected_id(), Some(1));
        screen.set_records(Vec::new());
        assert_eq!(screen.selected_id(), None);
    }

    #[test]
    fn row_movement_saturates_at_the_edges() {
        let mut screen = ListScreen::new(ResourceKind::Users);
        screen.set_records(vec![record(1, "Ada"), record(2, "Max")]);
        screen.row_prev();
        assert_eq!(screen.selected_id(), Some(1));
        screen.row_next();
        screen.row_next();
        assert_eq!(screen.selected_id(), Some(2));
    }

    #[test]
    fn editor_headings_follow_the_mode() {
        assert_eq!(
            EditorScreen::create(ResourceKind::Users).heading(),
            "Create New User"
        );
        assert_eq!(
            EditorScreen::edit(ResourceKind::AddressBooks, 9).heading(),
            "Update Address Book"
        );
    }

    #[test]
    fn editors_fetch_before_editing() {
        let mut editor = EditorScreen::edit(ResourceKind::Users, 5);
        assert!(editor.loading);
        let fetched = record(5, "Ada");
        editor.seed(&fetched);
        assert!(!editor.loading);
        assert_eq!(editor.form.values().get("name").map(String::as_str), Some("Ada"));
    }
}
