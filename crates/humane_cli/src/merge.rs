//! `merge` command: pick a target and sources, confirm, write the result.
//!
//! # Invariants
//! - The loaded backup is never modified; the result goes to `--output` or
//!   stdout.
//! - Cancelling at any prompt writes nothing and is not an error.

use crate::error::CliError;
use crate::prompt::MergePrompts;
use humane_core::{Habit, HabitData, MergePlan};
use log::info;
use std::io::Write;
use std::path::Path;

/// Command-line selections; anything missing is asked interactively.
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    pub into: Option<String>,
    pub from: Vec<String>,
    pub assume_yes: bool,
}

#[derive(Debug)]
pub enum MergeOutcome {
    Cancelled,
    /// Merged backup wrapped for querying.
    Merged { data: HabitData },
}

/// Runs selection, confirmation and the merge itself.
pub fn run_merge(
    data: &HabitData,
    request: &MergeRequest,
    prompter: &mut impl MergePrompts,
) -> Result<MergeOutcome, CliError> {
    if data.habits().len() < 2 {
        return Err(CliError::NotEnoughHabits);
    }

    let choices = sorted_choices(data);

    let target = match request.into.as_deref() {
        Some(id) => data
            .habit(id)
            .ok_or_else(|| CliError::UnknownHabit(id.to_string()))?,
        None => {
            let labels = choice_labels(data, &choices);
            let picked = prompter.select_one(
                "Select TARGET habit (entries will be merged INTO this one):",
                &labels,
            )?;
            match picked {
                Some(index) => choices[index],
                None => return Ok(MergeOutcome::Cancelled),
            }
        }
    };

    let sources: Vec<&Habit> = if request.from.is_empty() {
        let remaining: Vec<&Habit> = choices
            .iter()
            .copied()
            .filter(|habit| habit.id != target.id)
            .collect();
        let labels = choice_labels(data, &remaining);
        prompter
            .select_many(
                "Select SOURCE habits to merge (these will be REMOVED):",
                &labels,
            )?
            .into_iter()
            .map(|index| remaining[index])
            .collect()
    } else {
        request
            .from
            .iter()
            .map(|id| {
                data.habit(id)
                    .ok_or_else(|| CliError::UnknownHabit(id.clone()))
            })
            .collect::<Result<_, _>>()?
    };

    let plan = MergePlan::new(
        target.id.as_str(),
        sources.iter().map(|habit| habit.id.as_str()),
    );
    if plan.effective_sources().is_empty() {
        prompter.say("No sources selected, nothing to merge.")?;
        return Ok(MergeOutcome::Cancelled);
    }

    prompter.say("")?;
    prompter.say("Merge Summary:")?;
    prompter.say(&format!("  Target: {}", target.name()))?;
    prompter.say("  Sources to merge and remove:")?;
    for source in sources.iter().filter(|habit| habit.id != target.id) {
        prompter.say(&format!(
            "    - {} ({} entries)",
            source.name(),
            data.entry_count(&source.id)
        ))?;
    }

    if !request.assume_yes && !prompter.confirm("Proceed with merge?")? {
        prompter.say("Cancelled.")?;
        return Ok(MergeOutcome::Cancelled);
    }

    let merged = HabitData::new(plan.apply(data.snapshot()));
    let merged_entries = merged.entry_count(&target.id);
    info!(
        "event=merge_command module=cli status=ok sources={} merged_entries={}",
        plan.effective_sources().len(),
        merged_entries
    );
    prompter.say("")?;
    prompter.say(&format!("Merged into {merged_entries} entries."))?;

    Ok(MergeOutcome::Merged { data: merged })
}

/// Writes the merged backup as two-space-indented JSON.
pub fn write_merged(
    data: &HabitData,
    output: Option<&Path>,
    stdout: &mut impl Write,
    messages: &mut impl Write,
) -> Result<(), CliError> {
    let json = data.snapshot().to_pretty_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            writeln!(messages, "Written to {}", path.display())?;
        }
        None => writeln!(stdout, "{json}")?,
    }
    Ok(())
}

/// Habits ordered by raw category (missing sorts first) and then name.
fn sorted_choices(data: &HabitData) -> Vec<&Habit> {
    let mut habits: Vec<&Habit> = data.habits().iter().collect();
    habits.sort_by(|left, right| {
        raw_sort_key(left).cmp(&raw_sort_key(right))
    });
    habits
}

fn raw_sort_key(habit: &Habit) -> (&str, &str) {
    (
        habit.category.as_deref().unwrap_or(""),
        habit.name.as_deref().unwrap_or(""),
    )
}

fn choice_labels(data: &HabitData, habits: &[&Habit]) -> Vec<String> {
    habits
        .iter()
        .map(|habit| {
            format!(
                "{} ({} entries) [{}]",
                habit.name(),
                data.entry_count(&habit.id),
                habit.category()
            )
        })
        .collect()
}
