use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use crate::data::loader::parse_amount;

// ---------------------------------------------------------------------------
// Console – line-oriented prompts over any reader / writer
// ---------------------------------------------------------------------------

/// Interactive console. Every `ask_*` method returns `Ok(None)` once input
/// is exhausted (EOF), which callers treat as the user leaving.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for rendering tables and notices.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. Bytes that are not UTF-8
    /// become U+FFFD, so the caller's validation rejects them.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Ask until the answer is a positive amount. Currency symbols and
    /// thousands separators are accepted.
    pub fn ask_budget(&mut self) -> io::Result<Option<f64>> {
        loop {
            let Some(answer) = self.ask("Please enter your maximum budget (e.g., 1500000): ")? else {
                return Ok(None);
            };
            match parse_amount(&answer) {
                Some(budget) if budget > 0.0 => return Ok(Some(budget)),
                _ => writeln!(self.output, "Invalid input. Please enter a positive number.")?,
            }
        }
    }

    /// Ask until the answer is an integer within `range`.
    pub fn ask_choice(
        &mut self,
        prompt: &str,
        range: RangeInclusive<usize>,
        noun: &str,
    ) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(choice) if range.contains(&choice) => return Ok(Some(choice)),
                Ok(_) => writeln!(
                    self.output,
                    "Invalid choice. Please enter a valid {noun} ({}-{}).",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(self.output, "Invalid input. Please enter a number.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn budget_reprompts_until_positive() {
        let mut c = console("abc\n-5\n0\n1,500,000\n");
        assert_eq!(c.ask_budget().unwrap(), Some(1_500_000.0));
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Invalid input").count(), 3);
    }

    #[test]
    fn choice_rejects_out_of_range() {
        let mut c = console("9\nx\n2\n");
        assert_eq!(c.ask_choice("> ", 0..=3, "brand").unwrap(), Some(2));
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Invalid choice. Please enter a valid brand (0-3)."));
        assert!(out.contains("Invalid input. Please enter a number."));
    }

    #[test]
    fn invalid_utf8_is_reprompted() {
        let mut c = Console::new(&b"\xff\n1500000\n"[..], Vec::new());
        assert_eq!(c.ask_budget().unwrap(), Some(1_500_000.0));
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Invalid input").count(), 1);

        let mut c = Console::new(&b"\xfe\xfe\n2\n"[..], Vec::new());
        assert_eq!(c.ask_choice("> ", 0..=3, "brand").unwrap(), Some(2));
    }

    #[test]
    fn eof_aborts() {
        let mut c = console("nope\n");
        assert_eq!(c.ask_budget().unwrap(), None);
        assert_eq!(c.ask_choice("> ", 0..=1, "brand").unwrap(), None);
    }
}
