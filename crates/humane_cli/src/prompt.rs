//! Interactive prompts for the merge flow.
//!
//! # Invariants
//! - Escape or `q` at any prompt means "cancel", never an error.
//! - Prompts and messages go to stderr so stdout stays clean for JSON.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use std::io::{self, Write};

/// Questions asked while setting up a merge.
pub trait MergePrompts {
    /// Prints one informational line.
    fn say(&mut self, line: &str) -> dialoguer::Result<()>;

    /// Asks for exactly one choice. `None` when cancelled.
    fn select_one(
        &mut self,
        question: &str,
        labels: &[String],
    ) -> dialoguer::Result<Option<usize>>;

    /// Asks for any number of choices. Empty when cancelled.
    fn select_many(&mut self, question: &str, labels: &[String]) -> dialoguer::Result<Vec<usize>>;

    /// Yes/no question defaulting to "no".
    fn confirm(&mut self, question: &str) -> dialoguer::Result<bool>;
}

/// Arrow-key prompts on the controlling terminal.
pub struct TerminalPrompts {
    theme: ColorfulTheme,
    output: io::Stderr,
}

impl Default for TerminalPrompts {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            output: io::stderr(),
        }
    }
}

impl MergePrompts for TerminalPrompts {
    fn say(&mut self, line: &str) -> dialoguer::Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn select_one(
        &mut self,
        question: &str,
        labels: &[String],
    ) -> dialoguer::Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(labels)
            .default(0)
            .interact_opt()
    }

    fn select_many(&mut self, question: &str, labels: &[String]) -> dialoguer::Result<Vec<usize>> {
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{question} (space to toggle, enter to accept)"))
            .items(labels)
            .interact_opt()?;
        Ok(picked.unwrap_or_default())
    }

    fn confirm(&mut self, question: &str) -> dialoguer::Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact_opt()?;
        Ok(answer.unwrap_or(false))
    }
}

/// Replays canned answers and records everything shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompts {
    pub target: Option<usize>,
    pub sources: Vec<usize>,
    pub confirm: bool,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl MergePrompts for ScriptedPrompts {
    fn say(&mut self, line: &str) -> dialoguer::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn select_one(
        &mut self,
        question: &str,
        labels: &[String],
    ) -> dialoguer::Result<Option<usize>> {
        self.transcript.push(question.to_string());
        self.transcript.extend(labels.iter().cloned());
        Ok(self.target)
    }

    fn select_many(&mut self, question: &str, labels: &[String]) -> dialoguer::Result<Vec<usize>> {
        self.transcript.push(question.to_string());
        self.transcript.extend(labels.iter().cloned());
        Ok(self.sources.clone())
    }

    fn confirm(&mut self, question: &str) -> dialoguer::Result<bool> {
        self.transcript.push(question.to_string());
        Ok(self.confirm)
    }
}
