// Runner: the fixed script for one run. Authorize, solve every task in
// order, then fetch the summary. The first error stops the run.

use std::ops::Deref;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::api::{self, ApiClient, Session};
use crate::config::Config;
use crate::tasks;

type Step = fn(&ApiClient, &Session) -> crate::error::Result<Value>;

const STEPS: [(&str, Step); 5] = [
    ("task 1", tasks::perform_task1),
    ("task 2", tasks::perform_task2),
    ("task 3", tasks::perform_task3),
    ("task 4", tasks::perform_task4),
    ("secret task", tasks::perform_secret),
];

/// Endpoint of the results summary. An unset session id is sent as `None`.
pub fn results_endpoint(session: &Session) -> String {
    match session.id {
        Some(id) => format!("results/{id}"),
        None => "results/None".to_string(),
    }
}

/// Spinner that is cleared from the terminal when dropped, so an aborted
/// run leaves no stale line behind.
struct Spinner(ProgressBar);

impl Spinner {
    fn new(bar: ProgressBar) -> Result<Self> {
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Spinner(bar))
    }
}

impl Deref for Spinner {
    type Target = ProgressBar;

    fn deref(&self) -> &ProgressBar {
        &self.0
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

/// Run the whole sequence against `api` and return the results summary.
pub fn run(api: &ApiClient, config: &Config) -> Result<Value> {
    let spinner = Spinner::new(ProgressBar::new_spinner())?;

    spinner.set_message("Authorizing...");
    let session = api::authorize(api, &config.email, &config.phone).context("authorization")?;

    for (name, step) in STEPS {
        spinner.set_message(format!("Solving {name}..."));
        step(api, &session).with_context(|| format!("solving {name}"))?;
    }

    spinner.set_message("Fetching results...");
    let results: Value = api
        .get(&results_endpoint(&session), None)
        .context("fetching results")?;
    Ok(results)
}
