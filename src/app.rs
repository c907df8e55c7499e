use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::debug;

use crate::data::filter::{find_model, recommend};
use crate::data::model::CarDataset;
use crate::ui::prompt::Console;
use crate::ui::{menu, table};

/// Number of candidates shown when no `--top` is given.
pub const DEFAULT_TOP: usize = 10;

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

/// What the user picked after a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    SearchAgain,
    Compare,
    Exit,
}

impl NextStep {
    fn from_choice(choice: usize) -> Option<Self> {
        match choice {
            1 => Some(NextStep::SearchAgain),
            2 => Some(NextStep::Compare),
            3 => Some(NextStep::Exit),
            _ => None,
        }
    }
}

/// One interactive session over a loaded dataset.
pub struct Session<'a, R, W> {
    dataset: &'a CarDataset,
    console: Console<R, W>,
    top: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(dataset: &'a CarDataset, console: Console<R, W>, top: usize) -> Self {
        Self {
            dataset,
            console,
            top: top.max(1),
        }
    }

    /// Search → results → next step, until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        'search: loop {
            let prefs = menu::collect_preferences(&mut self.console, self.dataset)
                .context("reading preferences")?;
            let Some(prefs) = prefs else {
                return self.goodbye();
            };

            let rec = recommend(self.dataset, &prefs, self.top);
            table::render_results(self.console.out(), &rec).context("writing results")?;

            loop {
                match self.next_step()? {
                    Some(NextStep::SearchAgain) => continue 'search,
                    Some(NextStep::Compare) => {
                        if !self.compare()? {
                            return self.goodbye();
                        }
                    }
                    Some(NextStep::Exit) | None => return self.goodbye(),
                }
            }
        }
    }

    fn next_step(&mut self) -> Result<Option<NextStep>> {
        let out = self.console.out();
        writeln!(out, "\nWhat would you like to do next?")?;
        writeln!(out, "1. Search again")?;
        writeln!(out, "2. Compare two car models")?;
        writeln!(out, "3. End the chat")?;

        let step = self
            .console
            .ask_choice("Enter your choice (1, 2, or 3): ", 1..=3, "option")?
            .and_then(NextStep::from_choice);
        debug!("next step: {step:?}");
        Ok(step)
    }

    /// Returns `false` if input ended mid-prompt.
    fn compare(&mut self) -> Result<bool> {
        writeln!(self.console.out(), "\n--- Compare Two Car Models ---")?;
        let Some(first) = self.console.ask("Enter the first model (e.g., Swift): ")? else {
            return Ok(false);
        };
        let Some(second) = self.console.ask("Enter the second model: ")? else {
            return Ok(false);
        };

        let left = find_model(self.dataset, &first);
        let right = find_model(self.dataset, &second);
        debug!(
            "compare '{first}' ({}) vs '{second}' ({})",
            if left.is_some() { "found" } else { "missing" },
            if right.is_some() { "found" } else { "missing" }
        );

        table::render_comparison(self.console.out(), (first.as_str(), left), (second.as_str(), right))
            .context("writing comparison")?;
        Ok(true)
    }

    fn goodbye(&mut self) -> Result<()> {
        writeln!(
            self.console.out(),
            "Thank you for using the Car Recommendation System. Goodbye!"
        )?;
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CarRecord;

    fn dataset() -> CarDataset {
        let car = |brand: &str, model: &str, price: f64| CarRecord {
            brand: brand.into(),
            model: model.into(),
            price,
            fuel: "Petrol".into(),
            transmission: "Manual".into(),
            body: "Hatchback".into(),
            seats: 5,
        };
        CarDataset::from_records(
            vec![car("Maruti Suzuki", "Swift", 649_000.0), car("Toyota", "Glanza", 686_000.0)],
            0,
        )
    }

    fn run(input: &str) -> String {
        let ds = dataset();
        let mut session = Session::new(&ds, Console::new(input.as_bytes(), Vec::new()), DEFAULT_TOP);
        session.run().unwrap();
        String::from_utf8(session.into_console().into_output()).unwrap()
    }

    #[test]
    fn search_then_exit() {
        let out = run("700000\n0\n0\n0\n0\n0\n3\n");
        assert!(out.contains("showing 2 of 2 matches"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn compare_then_search_again() {
        let out = run("700000\n0\n0\n0\n0\n0\n2\nswift\nNonexistent-Model\n1\n100\n0\n0\n0\n0\n0\n3\n");
        assert!(out.contains("Model not found: 'Nonexistent-Model'"));
        assert!(out.contains("No cars found matching your criteria."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn invalid_next_step_reprompts() {
        let out = run("700000\n0\n0\n0\n0\n0\n7\nx\n3\n");
        assert!(out.contains("Invalid choice. Please enter a valid option (1-3)."));
    }

    #[test]
    fn undecodable_input_is_reprompted() {
        let ds = dataset();
        let input: &[u8] = b"\xff\xfe\n700000\n0\n0\n0\n0\n0\n3\n";
        let mut session = Session::new(&ds, Console::new(input, Vec::new()), DEFAULT_TOP);
        session.run().unwrap();
        let out = String::from_utf8(session.into_console().into_output()).unwrap();
        assert!(out.contains("Invalid input. Please enter a positive number."));
        assert!(out.contains("showing 2 of 2 matches"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn eof_ends_session_cleanly() {
        let out = run("");
        assert!(out.contains("Goodbye!"));
    }
}
