use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::HttpBackend;
use crate::app::worker::ApiWorker;
use crate::app::{App, UiOptions};
use crate::config::Config;
use crate::session::SessionStore;

/// The assembled console: configuration plus UI options, ready to run.
///
/// ```no_run
/// use backoffice::{Config, Console};
///
/// let console = Console::new(Config::default());
/// console.run().unwrap();
/// ```
#[derive(Debug)]
pub struct Console {
    config: Config,
    options: UiOptions,
}

impl Console {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            options: UiOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Wires the session store, HTTP backend and worker thread together and
    /// takes over the terminal until the user quits.
    pub fn run(self) -> Result<()> {
        let Console { config, options } = self;

        let state_dir = config.state_dir()?;
        fs::create_dir_all(&state_dir)
            .with_context(|| format!("failed to create {}", state_dir.display()))?;
        let session = SessionStore::open(config.token_path()?);

        info!(base_url = %config.base_url, "starting console");
        let backend = HttpBackend::new(&config.base_url, config.timeout(), session.clone());
        let worker = ApiWorker::spawn(Arc::new(backend))?;

        let mut app = App::new(session, worker, options);
        app.run()
    }
}
