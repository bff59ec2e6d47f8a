//! Per-tool validators

pub mod ansible;
pub mod argocd;
pub mod docker;
pub mod git;
pub mod helm;
pub mod kubectl;
pub mod terraform;
pub mod terragrunt;

pub use ansible::AnsibleValidator;
pub use argocd::ArgocdValidator;
pub use docker::DockerValidator;
pub use git::GitValidator;
pub use helm::HelmValidator;
pub use kubectl::KubectlValidator;
pub use terraform::TerraformValidator;
pub use terragrunt::TerragruntValidator;
