//! Ordered validator registry

use super::outcome::ValidationOutcome;
use super::tools::{
    AnsibleValidator, ArgocdValidator, DockerValidator, GitValidator, HelmValidator,
    KubectlValidator, TerraformValidator, TerragruntValidator,
};
use super::validator::CommandValidator;

/// Validators tried in order; the first that claims a command decides it
///
/// The standard order puts specific tool families before generic ones:
/// kubectl, terraform, terragrunt, helm, git, docker, ansible, argocd.
pub struct ValidatorChain {
    validators: Vec<Box<dyn CommandValidator>>,
}

impl ValidatorChain {
    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .with(KubectlValidator::new())
            .with(TerraformValidator::new())
            .with(TerragruntValidator::new())
            .with(HelmValidator::new())
            .with(GitValidator::new())
            .with(DockerValidator::new())
            .with(AnsibleValidator::new())
            .with(ArgocdValidator::new())
    }

    pub fn with(mut self, validator: impl CommandValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// The validator that owns `command`, if any.
    pub fn handler_for(&self, command: &str) -> Option<&dyn CommandValidator> {
        let command = command.trim();
        self.validators
            .iter()
            .find(|v| v.can_handle(command))
            .map(|v| v.as_ref())
    }

    /// Outcome of the first validator that claims the command; `Ok` when none does.
    pub fn validate(&self, command: &str) -> ValidationOutcome {
        match self.handler_for(command) {
            Some(validator) => validator.validate(command.trim()),
            None => ValidationOutcome::Ok,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}
