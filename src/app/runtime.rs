use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::domain::{FieldErrors, Record, RecordId, ResourceKind};
use crate::form::{FormCommand, FormEngine, FormState};
use crate::presentation::{self, UiContext};
use crate::schema::FormSchema;
use crate::session::{CurrentUser, RouteAccess, SessionStore};

use super::{
    input::{KeyCommand, classify},
    notice::NoticeBoard,
    options::UiOptions,
    router::{Route, Router},
    screen::{EditorScreen, ListScreen, LoginScreen, Screen},
    submit::{self, Launch, Outcome, SubmitTarget},
    terminal::TerminalSession,
    worker::{ApiEvent, ApiOutcome, ApiRequest, ApiWorker, Login},
};

pub(crate) struct App {
    session: SessionStore,
    worker: ApiWorker,
    router: Router,
    screen: Screen,
    notices: NoticeBoard,
    options: UiOptions,
    should_quit: bool,
}

fn screen_for(route: Route) -> Screen {
    match route {
        Route::Login => Screen::Login(LoginScreen::new()),
        Route::List(resource) => Screen::List(ListScreen::new(resource)),
        Route::Editor(resource, None) => Screen::Editor(EditorScreen::create(resource)),
        Route::Editor(resource, Some(id)) => Screen::Editor(EditorScreen::edit(resource, id)),
    }
}

impl App {
    pub fn new(session: SessionStore, worker: ApiWorker, options: UiOptions) -> Self {
        let router = Router::new(session.is_authenticated());
        let route = router.current();
        let mut app = Self {
            screen: screen_for(route),
            notices: NoticeBoard::new(options.notice_ttl),
            session,
            worker,
            router,
            options,
            should_quit: false,
        };
        app.dispatch_loads(route);
        app
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalSession::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.options.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(width, height) => terminal.resize(width, height)?,
                    _ => {}
                }
            }
            self.drain_worker();
            self.notices.sweep(Instant::now());
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let ctx = UiContext {
            user: self.session.user(),
            notice: self.notices.current(),
            show_help: self.options.show_help,
        };
        presentation::draw(frame, &mut self.screen, &ctx);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match classify(self.screen.input_mode(), &key) {
            KeyCommand::Quit => self.should_quit = true,
            KeyCommand::Logout => self.logout(),
            KeyCommand::FocusNext => self.form_command(FormCommand::FocusNext),
            KeyCommand::FocusPrev => self.form_command(FormCommand::FocusPrev),
            KeyCommand::Submit => self.submit_form(),
            KeyCommand::Back => self.leave_editor(),
            KeyCommand::RowNext => {
                if let Screen::List(list) = &mut self.screen {
                    list.row_next();
                }
            }
            KeyCommand::RowPrev => {
                if let Screen::List(list) = &mut self.screen {
                    list.row_prev();
                }
            }
            KeyCommand::Create => {
                if let Screen::List(list) = &self.screen {
                    let resource = list.resource;
                    self.navigate(Route::Editor(resource, None));
                }
            }
            KeyCommand::Edit => {
                if let Screen::List(list) = &self.screen
                    && let Some(id) = list.selected_id()
                {
                    let resource = list.resource;
                    self.navigate(Route::Editor(resource, Some(id)));
                }
            }
            KeyCommand::Delete => self.delete_selected(),
            KeyCommand::Refresh => {
                if let Screen::List(list) = &mut self.screen {
                    list.loading = true;
                    let resource = list.resource;
                    self.worker
                        .dispatch(self.router.scope(), ApiRequest::List { resource });
                }
            }
            KeyCommand::SwitchTab => {
                if let Screen::List(list) = &self.screen {
                    let next = match list.resource {
                        ResourceKind::Users => ResourceKind::AddressBooks,
                        ResourceKind::AddressBooks => ResourceKind::Users,
                    };
                    self.navigate(Route::List(next));
                }
            }
            KeyCommand::Input(key) => self.handle_field_input(&key),
            KeyCommand::None => {}
        }
    }

    /// The form receiving keystrokes, if the current screen has one that is
    /// ready for input.
    fn active_form(&mut self) -> Option<(&mut FormState, &FormSchema)> {
        match &mut self.screen {
            Screen::Login(login) => Some((&mut login.form, &login.schema)),
            Screen::Editor(editor) if !editor.loading => {
                Some((&mut editor.form, &editor.schema))
            }
            _ => None,
        }
    }

    fn form_command(&mut self, command: FormCommand) {
        if let Some((form, schema)) = self.active_form() {
            FormEngine::new(form, schema).dispatch(command);
        }
    }

    fn handle_field_input(&mut self, key: &KeyEvent) {
        let Some((form, schema)) = self.active_form() else {
            return;
        };
        let edited = form
            .focused_mut()
            .and_then(|field| field.handle_key(key).then(|| field.spec.name.clone()));
        if let Some(field) = edited {
            FormEngine::new(form, schema).dispatch(FormCommand::Edited { field });
        }
    }

    /// Runs the local half of the pipeline for whichever form is showing.
    /// Server errors from the previous attempt are dropped before the new
    /// attempt validates.
    fn submit_form(&mut self) {
        let scope = self.router.scope();
        let prepared = match &mut self.screen {
            Screen::Login(login) => {
                login.form.clear_server_errors();
                let values = login.form.values();
                let launch = submit::prepare(&login.schema, SubmitTarget::Login, &values);
                Some((launch, &mut login.form))
            }
            Screen::Editor(editor) if !editor.loading => {
                editor.form.clear_server_errors();
                let values = editor.form.values();
                let target = SubmitTarget::Record {
                    resource: editor.resource,
                    existing: editor.record_id,
                };
                let launch = submit::prepare(&editor.schema, target, &values);
                Some((launch, &mut editor.form))
            }
            _ => None,
        };
        let Some((launch, form)) = prepared else {
            return;
        };
        match launch {
            Launch::Rejected { errors } => form.set_client_errors(&errors),
            Launch::Dispatched { request } => {
                form.set_client_errors(&FieldErrors::new());
                self.worker.dispatch(scope, request);
            }
        }
    }

    /// Drops the session locally first, no matter what; the server-side
    /// invalidation call is fire-and-forget and carries its own copy of the
    /// token being invalidated.
    fn logout(&mut self) {
        let Some(token) = self.session.token() else {
            return;
        };
        self.session.clear();
        self.worker
            .dispatch(self.router.scope(), ApiRequest::Logout { token });
        self.navigate(Route::Login);
    }

    fn delete_selected(&mut self) {
        let Screen::List(list) = &self.screen else {
            return;
        };
        let Some(id) = list.selected_id() else {
            return;
        };
        let resource = list.resource;
        self.worker
            .dispatch(self.router.scope(), ApiRequest::Remove { resource, id });
    }

    fn leave_editor(&mut self) {
        if let Screen::Editor(editor) = &self.screen {
            let resource = editor.resource;
            self.navigate(Route::List(resource));
        }
    }

    fn navigate(&mut self, target: Route) {
        let landed = self
            .router
            .navigate(target, self.session.is_authenticated());
        self.screen = screen_for(landed);
        self.dispatch_loads(landed);
    }

    fn dispatch_loads(&mut self, route: Route) {
        let scope = self.router.scope();
        match route {
            Route::Login | Route::Editor(_, None) => {}
            Route::List(resource) => self.worker.dispatch(scope, ApiRequest::List { resource }),
            Route::Editor(resource, Some(id)) => {
                self.worker.dispatch(scope, ApiRequest::Fetch { resource, id });
            }
        }
        if route.access() == RouteAccess::Protected && self.session.user().is_none() {
            self.worker.dispatch(scope, ApiRequest::FetchMe);
        }
    }

    fn drain_worker(&mut self) {
        for event in self.worker.poll() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ApiEvent) {
        let current = self.router.is_current(event.scope);
        match event.outcome {
            // Session-wide outcomes apply regardless of scope.
            ApiOutcome::Me(result) => self.apply_me(result),
            ApiOutcome::LoggedOut(result) => {
                if let Err(err) = result {
                    debug!(error = %err, "logout call failed; session already dropped locally");
                }
            }
            _ if !current => {
                debug!("discarding completion from a stale scope");
            }
            ApiOutcome::LoggedIn(result) => self.apply_login(result),
            ApiOutcome::Listed { resource, result } => self.apply_listed(resource, result),
            ApiOutcome::Fetched {
                resource,
                id,
                result,
            } => self.apply_fetched(resource, id, result),
            ApiOutcome::Saved { resource, result } => self.apply_saved(resource, result),
            ApiOutcome::Removed { resource, result } => self.apply_removed(resource, result),
        }
    }

    fn apply_me(&mut self, result: Result<CurrentUser, ApiError>) {
        // A lookup can complete after logout; a signed-out session takes no
        // identity updates.
        if !self.session.is_authenticated() {
            debug!("dropping an account lookup for a signed-out session");
            return;
        }
        match result {
            Ok(user) => self.session.set_user(user),
            Err(ApiError::Auth) => self.session_expired(),
            Err(err) => warn!(error = %err, "could not load the signed-in account"),
        }
    }

    fn apply_login(&mut self, result: Result<Login, ApiError>) {
        match result {
            Ok(granted) => {
                self.session.set_token(&granted.token);
                if let Some(user) = granted.user {
                    self.session.set_user(user);
                }
                self.navigate(Route::home());
            }
            Err(ApiError::Validation { errors }) => {
                if let Screen::Login(login) = &mut self.screen {
                    login.form.set_server_errors(&errors);
                }
            }
            Err(ApiError::Auth) => self.notices.error("Invalid credentials."),
            Err(err) => {
                warn!(error = %err, "login failed");
                self.notices.error(ApiError::FALLBACK_NOTICE);
            }
        }
    }

    fn apply_listed(&mut self, resource: ResourceKind, result: Result<Vec<Record>, ApiError>) {
        let Screen::List(list) = &mut self.screen else {
            return;
        };
        if list.resource != resource {
            return;
        }
        match result {
            Ok(records) => list.set_records(records),
            Err(err) => {
                list.loading = false;
                self.report_failure(err);
            }
        }
    }

    fn apply_fetched(
        &mut self,
        resource: ResourceKind,
        id: RecordId,
        result: Result<Record, ApiError>,
    ) {
        let relevant = matches!(
            &self.screen,
            Screen::Editor(editor) if editor.resource == resource && editor.record_id == Some(id)
        );
        if !relevant {
            return;
        }
        match result {
            Ok(record) => {
                if let Screen::Editor(editor) = &mut self.screen {
                    editor.seed(&record);
                }
            }
            Err(err) => {
                if let Screen::Editor(editor) = &mut self.screen {
                    editor.loading = false;
                }
                self.report_failure(err);
            }
        }
    }

    fn apply_saved(&mut self, resource: ResourceKind, result: Result<String, ApiError>) {
        match submit::conclude(result) {
            Outcome::Saved { message } => {
                self.notices.success(message);
                self.navigate(Route::List(resource));
            }
            Outcome::Invalid { errors } => {
                if let Screen::Editor(editor) = &mut self.screen {
                    editor.form.set_server_errors(&errors);
                }
            }
            Outcome::Failed { error } => self.report_failure(error),
        }
    }

    fn apply_removed(&mut self, resource: ResourceKind, result: Result<String, ApiError>) {
        match result {
            Ok(message) => {
                self.notices.success(message);
                if let Screen::List(list) = &mut self.screen
                    && list.resource == resource
                {
                    list.loading = true;
                    self.worker
                        .dispatch(self.router.scope(), ApiRequest::List { resource });
                }
            }
            Err(err) => self.report_failure(err),
        }
    }

    /// Fallback surfacing for failures that carry no field feedback.
    fn report_failure(&mut self, error: ApiError) {
        match error {
            ApiError::Auth => self.session_expired(),
            err => {
                warn!(error = %err, "backend call failed");
                self.notices.error(ApiError::FALLBACK_NOTICE);
            }
        }
    }

    fn session_expired(&mut self) {
        self.session.clear();
        self.navigate(Route::Login);
        self.notices.error(ApiError::SESSION_EXPIRED_NOTICE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Backend;
    use crate::app::worker::Scope;
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct NullBackend;

    impl Backend for NullBackend {
        fn get(&self, _path: &str) -> Result<Value, ApiError> {
            Ok(json!({}))
        }

        fn post(&self, _path: &str, _body: Option<&Value>) -> Result<Value, ApiError> {
            Ok(json!({}))
        }

        fn post_with_token(&self, _path: &str, _token: &str) -> Result<Value, ApiError> {
            Ok(json!({}))
        }

        fn put(&self, _path: &str, _body: &Value) -> Result<Value, ApiError> {
            Ok(json!({}))
        }

        fn delete(&self, _path: &str) -> Result<Value, ApiError> {
            Ok(json!({}))
        }
    }

    fn app(authenticated: bool) -> App {
        let session = SessionStore::in_memory();
        if authenticated {
            session.set_token("token-1");
        }
        let worker = ApiWorker::spawn(Arc::new(NullBackend)).unwrap();
        App::new(session, worker, UiOptions::default())
    }

    fn event(app: &App, outcome: ApiOutcome) -> ApiEvent {
        ApiEvent {
            scope: app.router.scope(),
            outcome,
        }
    }

    #[test]
    fn unauthenticated_sessions_land_on_login() {
        let app = app(false);
        assert_eq!(app.router.current(), Route::Login);
        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[test]
    fn login_success_stores_the_token_and_goes_home() {
        let mut app = app(false);
        let outcome = ApiOutcome::LoggedIn(Ok(Login {
            token: "fresh".to_string(),
            user: Some(CurrentUser {
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
            }),
        }));
        let event = event(&app, outcome);
        app.apply(event);
        assert!(app.session.is_authenticated());
        assert_eq!(app.router.current(), Route::home());
        assert_eq!(app.session.user().unwrap().name, "Admin");
    }

    #[test]
    fn stale_completions_are_discarded() {
        let mut app = app(true);
        let stale = Scope(app.router.scope().0.wrapping_sub(1));
        app.apply(ApiEvent {
            scope: stale,
            outcome: ApiOutcome::Saved {
                resource: ResourceKind::Users,
                result: Ok("Saved".to_string()),
            },
        });
        // no navigation happened and no notice appeared
        assert_eq!(app.router.current(), Route::home());
        assert!(app.notices.current().is_none());
    }

    #[test]
    fn rejected_save_populates_server_errors() {
        let mut app = app(true);
        app.navigate(Route::Editor(ResourceKind::Users, None));
        let errors: FieldErrors = [("email".to_string(), "already taken".to_string())]
            .into_iter()
            .collect();
        let event = event(&app, ApiOutcome::Saved {
            resource: ResourceKind::Users,
            result: Err(ApiError::Validation { errors }),
        });
        app.apply(event);
        match &mut app.screen {
            Screen::Editor(editor) => {
                assert_eq!(
                    editor.form.field_mut("email").unwrap().server_error.as_deref(),
                    Some("already taken")
                );
            }
            _ => panic!("expected the editor to stay up"),
        }
        assert_eq!(
            app.router.current(),
            Route::Editor(ResourceKind::Users, None)
        );
    }

    #[test]
    fn back_to_back_rejections_keep_the_latest_messages() {
        let mut app = app(true);
        app.navigate(Route::Editor(ResourceKind::AddressBooks, None));
        for message in ["already taken", "is invalid"] {
            let errors: FieldErrors = [("email".to_string(), message.to_string())]
                .into_iter()
                .collect();
            let event = event(&app, ApiOutcome::Saved {
                resource: ResourceKind::AddressBooks,
                result: Err(ApiError::Validation { errors }),
            });
            app.apply(event);
        }
        match &mut app.screen {
            Screen::Editor(editor) => {
                assert_eq!(
                    editor.form.field_mut("email").unwrap().server_error.as_deref(),
                    Some("is invalid")
                );
            }
            _ => panic!("expected the editor to stay up"),
        }
    }

    #[test]
    fn successful_save_notifies_and_returns_to_the_list() {
        let mut app = app(true);
        app.navigate(Route::Editor(ResourceKind::AddressBooks, Some(4)));
        let event = event(&app, ApiOutcome::Saved {
            resource: ResourceKind::AddressBooks,
            result: Ok("Address book updated successfully".to_string()),
        });
        app.apply(event);
        assert_eq!(
            app.router.current(),
            Route::List(ResourceKind::AddressBooks)
        );
        assert_eq!(
            app.notices.current().unwrap().text,
            "Address book updated successfully"
        );
    }

    #[test]
    fn auth_failures_drop_the_session() {
        let mut app = app(true);
        let event = event(&app, ApiOutcome::Listed {
            resource: ResourceKind::Users,
            result: Err(ApiError::Auth),
        });
        app.apply(event);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.router.current(), Route::Login);
        assert_eq!(
            app.notices.current().unwrap().text,
            ApiError::SESSION_EXPIRED_NOTICE
        );
    }

    #[test]
    fn delete_success_refetches_the_current_list() {
        let mut app = app(true);
        let event = event(&app, ApiOutcome::Removed {
            resource: ResourceKind::Users,
            result: Ok("User deleted successfully".to_string()),
        });
        app.apply(event);
        match &app.screen {
            Screen::List(list) => assert!(list.loading),
            _ => panic!("expected to stay on the list"),
        }
        assert_eq!(
            app.notices.current().unwrap().text,
            "User deleted successfully"
        );
    }

    #[test]
    fn logout_clears_locally_before_any_response() {
        let mut app = app(true);
        app.logout();
        assert!(!app.session.is_authenticated());
        assert_eq!(app.router.current(), Route::Login);
    }

    #[test]
    fn stale_account_lookups_do_not_revive_a_signed_out_session() {
        let mut app = app(true);
        let before = app.router.scope();
        app.logout();
        app.apply(ApiEvent {
            scope: before,
            outcome: ApiOutcome::Me(Ok(CurrentUser {
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
            })),
        });
        assert!(app.session.user().is_none());
        app.apply(ApiEvent {
            scope: before,
            outcome: ApiOutcome::Me(Err(ApiError::Auth)),
        });
        assert!(app.notices.current().is_none());
        assert_eq!(app.router.current(), Route::Login);
    }
}
