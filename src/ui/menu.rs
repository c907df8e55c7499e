use std::io::{self, BufRead, Write};

use crate::data::filter::{Preference, PreferenceSet};
use crate::data::model::{CarDataset, Column};

use super::prompt::Console;

const NO_PREFERENCE: &str = "No preference";

// ---------------------------------------------------------------------------
// Menu box
// ---------------------------------------------------------------------------

/// Draw a boxed, numbered menu. Option `0` is always "No preference".
pub fn render_menu_box<W: Write>(out: &mut W, title: &str, options: &[String]) -> io::Result<()> {
    let labels: Vec<String> = std::iter::once(NO_PREFERENCE)
        .chain(options.iter().map(String::as_str))
        .enumerate()
        .map(|(i, opt)| format!("{i}. {opt}"))
        .collect();

    let inner = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0)
        + 2;
    let border = "-".repeat(inner + 2);

    writeln!(out, "{border}")?;
    writeln!(out, "|{title:^inner$}|")?;
    writeln!(out, "{border}")?;
    for label in &labels {
        writeln!(out, "| {label:<width$} |", width = inner - 2)?;
    }
    writeln!(out, "{border}")
}

// ---------------------------------------------------------------------------
// Preference collection
// ---------------------------------------------------------------------------

/// Run the budget prompt and one menu per optional column. Returns `None`
/// if input ends before every answer is given.
pub fn collect_preferences<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &CarDataset,
) -> io::Result<Option<PreferenceSet>> {
    let Some(budget) = console.ask_budget()? else {
        return Ok(None);
    };
    let mut prefs = PreferenceSet::with_budget(budget);

    for column in Column::ALL {
        let options = dataset.options(column);
        render_menu_box(console.out(), column.title(), &options)?;

        let prompt = format!("Enter the number for your preferred {}: ", column.noun());
        let Some(choice) = console.ask_choice(&prompt, 0..=options.len(), column.noun())? else {
            return Ok(None);
        };
        // 0 is "No preference"; 1..=n index the options.
        let index = choice.checked_sub(1);

        match prefs.text_mut(column) {
            Some(slot) => {
                *slot = index
                    .and_then(|i| options.get(i))
                    .map(|v| Preference::Value(v.clone()))
                    .unwrap_or_default();
            }
            None => {
                prefs.seats = index
                    .and_then(|i| dataset.seat_values.get(i))
                    .map(|s| Preference::Value(*s))
                    .unwrap_or_default();
            }
        }
    }

    Ok(Some(prefs))
}
