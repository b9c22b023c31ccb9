//! `list` command: habits grouped by category with entry counts.

use humane_core::HabitData;
use std::io::{self, Write};

const RULE_WIDTH: usize = 40;

/// Writes every category (sorted) and its habits (sorted by name).
pub fn write_listing(data: &HabitData, out: &mut impl Write) -> io::Result<()> {
    let mut groups = data.categories();
    groups.sort_by(|left, right| left.category.cmp(right.category));

    for group in groups {
        writeln!(out)?;
        writeln!(out, "{}", group.category.to_uppercase())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        let mut habits = group.habits;
        habits.sort_by(|left, right| left.name().cmp(right.name()));
        for habit in habits {
            writeln!(
                out,
                "  {:<30} ({:>3} entries)",
                habit.name(),
                data.entry_count(&habit.id)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_listing;
    use humane_core::{Entry, Habit, HabitData, Snapshot};

    #[test]
    fn listing_sorts_categories_and_habits() {
        let data = HabitData::new(Snapshot::new(
            vec![
                Habit::new("w", "Meditation").with_category("wellness"),
                Habit::new("r", "Morning Run").with_category("fitness"),
                Habit::new("e", "Evening Walk").with_category("fitness"),
            ],
            vec![
                Entry::new("e1", "r", "2025-11-28", 1, ""),
                Entry::new("e2", "r", "2025-11-27", 1, ""),
            ],
        ));

        let mut out = Vec::new();
        write_listing(&data, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "FITNESS");
        assert_eq!(lines[2], "-".repeat(40));
        assert_eq!(lines[3], format!("  {:<30} (  0 entries)", "Evening Walk"));
        assert_eq!(lines[4], format!("  {:<30} (  2 entries)", "Morning Run"));
        assert_eq!(lines[6], "WELLNESS");
    }
}
