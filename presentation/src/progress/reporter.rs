//! Progress reporting while a backend is being queried

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use shellfix_application::DecisionProgress;
use shellfix_domain::{Model, ValidationOutcome};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner on stderr while a query is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn attempt_label(attempt: usize) -> String {
        if attempt > 1 {
            format!("Re-querying (attempt {})", attempt)
        } else {
            "Analyzing".to_string()
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionProgress for ProgressReporter {
    fn on_query_start(&self, model: &Model, attempt: usize) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::attempt_label(attempt));
        pb.set_message(model.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_query_complete(&self, _model: &Model, _success: bool) {
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            pb.finish_and_clear();
        }
    }

    fn on_requery(&self, reason: &str) {
        eprintln!("{} {}", "⚠️ ".yellow(), reason.yellow());
        eprintln!("{}", "Querying AI again with validation context...".cyan());
    }
}

/// Plain stderr lines for non-interactive terminals
pub struct SimpleProgress;

impl DecisionProgress for SimpleProgress {
    fn on_query_start(&self, model: &Model, attempt: usize) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            ProgressReporter::attempt_label(attempt).bold(),
            model
        );
    }

    fn on_query_complete(&self, model: &Model, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_cache_hit(&self) {
        eprintln!("{} cache hit", "->".cyan());
    }

    fn on_validation(&self, outcome: &ValidationOutcome) {
        if let Some(message) = outcome.message() {
            eprintln!("  {} {}", "!".yellow(), message);
        }
    }

    fn on_requery(&self, reason: &str) {
        eprintln!("{} {}", "->".cyan(), reason);
        eprintln!("Querying AI again with validation context...");
    }
}
