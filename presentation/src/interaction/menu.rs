//! Failure menu shown in interactive activation mode
//!
//! ```text
//! 🤖 Command failed. What would you like to do?
//!   [1] Get AI suggestion - Let AI analyze and suggest a fix
//!   [2] Show manual - Display manual page for this command
//!   [3] Skip - Continue without fixing
//!   [4] Disable AI for session - Turn off AI until terminal restart
//!
//! Your choice:
//! ```

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// What the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Suggest,
    ShowManual,
    Skip,
    Disable,
}

struct MenuOption {
    key: &'static str,
    label: &'static str,
    description: &'static str,
    choice: MenuChoice,
}

const OPTIONS: &[MenuOption] = &[
    MenuOption {
        key: "1",
        label: "Get AI suggestion",
        description: "Let AI analyze and suggest a fix",
        choice: MenuChoice::Suggest,
    },
    MenuOption {
        key: "2",
        label: "Show manual",
        description: "Display manual page for this command",
        choice: MenuChoice::ShowManual,
    },
    MenuOption {
        key: "3",
        label: "Skip",
        description: "Continue without fixing",
        choice: MenuChoice::Skip,
    },
    MenuOption {
        key: "4",
        label: "Disable AI for session",
        description: "Turn off AI until terminal restart",
        choice: MenuChoice::Disable,
    },
];

/// Result of reading one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Chosen(MenuChoice),
    /// Unknown key; treated as skip after a warning
    Invalid(String),
    /// Empty line
    Empty,
}

/// Map raw input to a selection. Input is trimmed and lowercased.
pub fn parse_choice(input: &str) -> MenuSelection {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return MenuSelection::Empty;
    }

    OPTIONS
        .iter()
        .find(|o| o.key == input)
        .map(|o| MenuSelection::Chosen(o.choice))
        .unwrap_or(MenuSelection::Invalid(input))
}

/// Prompts over any reader/writer pair so tests can drive it
pub struct FailureMenu<R, W> {
    input: R,
    output: W,
}

impl FailureMenu<io::StdinLock<'static>, io::Stderr> {
    /// Menu on stdin, rendered on stderr so stdout stays clean.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> FailureMenu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            "🤖 Command failed. What would you like to do?".cyan().bold()
        )?;
        for option in OPTIONS {
            writeln!(
                self.output,
                "  {} {} - {}",
                format!("[{}]", option.key).yellow(),
                option.label.bold(),
                option.description
            )?;
        }
        writeln!(self.output)?;
        write!(self.output, "{}", "Your choice: ".green())?;
        self.output.flush()
    }

    /// Show the menu and read one line.
    ///
    /// Read failures and end of input come back as `Err`; callers treat
    /// them as a cancelled prompt.
    pub fn prompt(&mut self) -> io::Result<MenuChoice> {
        self.render()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
        }

        match parse_choice(&line) {
            MenuSelection::Chosen(choice) => Ok(choice),
            MenuSelection::Empty => Ok(MenuChoice::Skip),
            MenuSelection::Invalid(raw) => {
                writeln!(
                    self.output,
                    "{}",
                    format!("⚠️  Invalid choice: {}", raw).yellow()
                )?;
                Ok(MenuChoice::Skip)
            }
        }
    }
}
