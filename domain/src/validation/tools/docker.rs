//! docker validator
//!
//! Flag allow-lists for the subcommands models get wrong most often
//! (`ps`, `stats`, `run`); other subcommands pass.

use crate::validation::outcome::ValidationOutcome;
use crate::validation::rules::invoked_as;
use crate::validation::validator::CommandValidator;

const PS_FLAGS: &[&str] = &[
    "-a", "--all", "-f", "--filter", "--format", "-n", "--last", "-l", "--latest", "--no-trunc",
    "-q", "--quiet", "-s", "--size",
];

const STATS_FLAGS: &[&str] = &["-a", "--all", "--format", "--no-stream", "--no-trunc"];

const RUN_FLAGS: &[&str] = &[
    "-d", "--detach", "-e", "--env", "-p", "--publish", "-v", "--volume", "--name", "--rm", "-i",
    "--interactive", "-t", "--tty", "--network", "--restart", "-w", "--workdir", "-u", "--user",
];

fn rejected(reason: &str, hint: &str) -> ValidationOutcome {
    ValidationOutcome::invalid(format!("invalid command: {} (hint: {})", reason, hint))
}

/// Flag name without an inline `=value`.
fn flag_name(arg: &str) -> &str {
    arg.split('=').next().unwrap_or(arg)
}

/// Container engine CLI
#[derive(Debug, Clone, Default)]
pub struct DockerValidator;

impl DockerValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_ps(args: &[&str]) -> Option<ValidationOutcome> {
        for arg in args {
            if arg.starts_with("--sort") {
                return Some(rejected(
                    "docker ps does not have a --sort flag",
                    "use 'docker stats --no-stream | sort' or format with --format and pipe to sort",
                ));
            }
            if arg.starts_with('-') && !PS_FLAGS.contains(&flag_name(arg)) {
                return Some(rejected(
                    &format!("invalid flag {} for docker ps", arg),
                    "run 'docker ps --help' for valid flags",
                ));
            }
        }
        None
    }

    fn validate_stats(args: &[&str]) -> Option<ValidationOutcome> {
        args.iter()
            .find(|arg| arg.starts_with('-') && !STATS_FLAGS.contains(&flag_name(arg)))
            .map(|arg| {
                rejected(
                    &format!("invalid flag {} for docker stats", arg),
                    "run 'docker stats --help' for valid flags",
                )
            })
    }

    fn validate_run(args: &[&str]) -> Option<ValidationOutcome> {
        let mut previous: Option<&str> = None;

        for &arg in args {
            if arg.starts_with('-') {
                let flag = flag_name(arg);
                if !RUN_FLAGS.contains(&flag) && flag.starts_with("--port") {
                    return Some(rejected(
                        "invalid flag --port, did you mean -p or --publish?",
                        "use -p host:container or --publish host:container",
                    ));
                }
            }

            if matches!(previous, Some("-p") | Some("--publish")) && !arg.contains(':') {
                return Some(rejected(
                    "port mapping must be in format host:container",
                    "example: -p 8080:80",
                ));
            }

            previous = Some(arg);
        }
        None
    }
}

impl CommandValidator for DockerValidator {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn can_handle(&self, command: &str) -> bool {
        invoked_as(command, &["docker"])
    }

    fn validate(&self, command: &str) -> ValidationOutcome {
        let parts: Vec<&str> = command.split_whitespace().collect();

        let Some(sub) = parts.get(1) else {
            return rejected(
                "incomplete docker command",
                "docker commands need a subcommand (e.g., 'docker ps')",
            );
        };

        let args = &parts[2..];
        let outcome = match *sub {
            "ps" => Self::validate_ps(args),
            "stats" => Self::validate_stats(args),
            "run" => Self::validate_run(args),
            _ => None,
        };
        outcome.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ps_sort_is_blocking() {
        let outcome = DockerValidator::new().validate("docker ps --sort=name");
        assert!(outcome.is_blocking());
        assert!(outcome.message().unwrap().contains("--sort"));
    }

    #[test]
    fn test_ps_known_flags() {
        let v = DockerValidator::new();
        assert!(v.validate("docker ps -a --format={{.Names}}").is_ok());
        assert!(v.validate("docker ps --all --filter status=exited").is_ok());
    }

    #[test]
    fn test_stats_unknown_flag() {
        let outcome = DockerValidator::new().validate("docker stats --top 5");
        assert!(outcome.message().unwrap().contains("docker stats"));
    }

    #[test]
    fn test_run_port_mapping() {
        let v = DockerValidator::new();
        assert!(v.validate("docker run -d -p 8080:80 nginx").is_ok());
        assert!(v.validate("docker run -p 8080 nginx").is_blocking());
        assert!(v.validate("docker run --port 8080:80 nginx").is_blocking());
    }

    #[test]
    fn test_bare_docker_is_incomplete() {
        let v = DockerValidator::new();
        assert!(v.can_handle("docker"));
        assert!(v.validate("docker").message().unwrap().contains("incomplete docker command"));
    }

    #[test]
    fn test_other_subcommands_pass() {
        assert!(DockerValidator::new().validate("docker compose up -d").is_ok());
    }
}
