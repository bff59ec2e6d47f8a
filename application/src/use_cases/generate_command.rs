//! Generate Command use case.
//!
//! Proactive pipeline: a natural-language request becomes a command. There is
//! no cache and no re-query; validation findings are advisory. The danger
//! scan still fails closed.

use crate::config::BehaviorConfig;
use crate::ports::backend::SuggestionBackend;
use crate::ports::progress::{DecisionProgress, NoProgress};
use crate::use_cases::analyze_failure::AnalyzeError;
use crate::use_cases::decision::{AcceptedSuggestion, Decision, DecisionContext, RejectedAttempt};
use crate::use_cases::shared::{query_with_deadline, validate_suggestion};
use shellfix_domain::core::string::truncate;
use shellfix_domain::{DangerScanner, Request, ValidatorChain, command_complexity, confidence};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for turning a request into a command.
pub struct GenerateCommandUseCase {
    backend: Arc<dyn SuggestionBackend>,
    validators: Arc<ValidatorChain>,
    scanner: DangerScanner,
    config: BehaviorConfig,
}

impl GenerateCommandUseCase {
    pub fn new(backend: Arc<dyn SuggestionBackend>) -> Self {
        Self {
            backend,
            validators: Arc::new(ValidatorChain::standard()),
            scanner: DangerScanner::new(),
            config: BehaviorConfig::default(),
        }
    }

    pub fn with_validators(mut self, validators: Arc<ValidatorChain>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn execute(
        &self,
        request: &Request,
        ctx: &DecisionContext,
    ) -> Result<Decision, AnalyzeError> {
        self.execute_with_progress(request, ctx, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        request: &Request,
        ctx: &DecisionContext,
        progress: &dyn DecisionProgress,
    ) -> Result<Decision, AnalyzeError> {
        if ctx.is_session_disabled() {
            return Ok(Decision::Skipped);
        }

        info!("Generating command for: {}", truncate(request.command(), 100));

        let suggestion = query_with_deadline(
            self.backend.as_ref(),
            request,
            self.config.timeout,
            ctx,
            progress,
            1,
        )
        .await?;

        let outcome = validate_suggestion(&self.validators, &suggestion);
        progress.on_validation(&outcome);

        if suggestion.is_empty() {
            let reason = outcome.message().unwrap_or_default().to_string();
            return Ok(Decision::Rejected(vec![RejectedAttempt { suggestion, reason }]));
        }
        if let Some(message) = outcome.message() {
            warn!("Generated command has validation findings: {}", message);
        }

        let complexity = command_complexity(request.command());
        let confidence = confidence::score(&suggestion, &outcome, complexity);

        let finding = self.scanner.scan(&suggestion.command);
        if finding.is_dangerous {
            warn!("Refusing dangerous generated command: {}", suggestion.command);
            return Ok(Decision::Dangerous {
                suggestion,
                finding,
                confidence,
            });
        }

        Ok(Decision::Accepted(AcceptedSuggestion {
            suggestion,
            confidence,
            validation: outcome,
            requeried: false,
            persist_warning: None,
        }))
    }
}
