//! Line-oriented console I/O: prompts, yes/no answers, and the review
//! session over stdin/stdout.

use std::io::{BufRead, Write};
use vocab_core::{Result, Reviewer, VocabularyEntry};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` without a newline and flush it
    pub fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Next input line without its line ending; `None` at end of input
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt for a line of text
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.prompt(question)?;
        self.read_line()
    }

    /// Prompt for a yes/no answer
    ///
    /// Blank lines are skipped; the answer is yes when the first character
    /// is `y` or `Y`. End of input counts as no.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        self.prompt(question)?;
        while let Some(line) = self.read_line()? {
            if let Some(first) = line.trim_start().chars().next() {
                return Ok(first.eq_ignore_ascii_case(&'y'));
            }
        }
        Ok(false)
    }

    /// Prompt until the answer parses as an integer in `range`
    ///
    /// Returns `None` at end of input.
    pub fn ask_choice(
        &mut self,
        question: &str,
        range: std::ops::RangeInclusive<i64>,
        retry: &str,
    ) -> Result<Option<i64>> {
        self.prompt(question)?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => self.prompt(retry)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Reviewer for Console<R, W> {
    fn begin(&mut self, count: usize) -> Result<()> {
        self.say(&format!("\nToday's vocabulary review ({} words):", count))
    }

    fn knows(&mut self, word: &str) -> Result<bool> {
        self.say(&format!("\nWord: {}", word))?;
        self.ask_yes_no("Do you know the meaning? (y/n): ")
    }

    fn reveal(&mut self, entry: &VocabularyEntry) -> Result<()> {
        self.say(&format!("Meaning: {}", entry.meaning))
    }

    fn confirm(&mut self, _entry: &VocabularyEntry) -> Result<bool> {
        self.ask_yes_no("Is this correct? (y/n): ")
    }

    fn learned(&mut self, word: &str) -> Result<()> {
        self.say(&format!("Congratulations! You've learned the word: {}", word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_yes_no_skips_blank_lines() {
        let mut c = console("\n   \n Yes please\nn\n");
        assert!(c.ask_yes_no("? ").unwrap());
        assert!(!c.ask_yes_no("? ").unwrap());
        assert!(!c.ask_yes_no("? ").unwrap()); // end of input
    }

    #[test]
    fn test_read_line_strips_crlf() {
        let mut c = console("word with spaces \r\n");
        assert_eq!(c.read_line().unwrap().as_deref(), Some("word with spaces "));
        assert_eq!(c.read_line().unwrap(), None);
    }

    #[test]
    fn test_choice_retries_until_valid() {
        let mut c = console("abc\n7\n 2 \n");
        let choice = c.ask_choice("Choose: ", 1..=4, "Again: ").unwrap();
        assert_eq!(choice, Some(2));

        let output = String::from_utf8(c.output).unwrap();
        assert_eq!(output.matches("Again: ").count(), 2);
    }

    #[test]
    fn test_review_prompts() {
        let mut c = console("y\nn\n");
        let entry = VocabularyEntry::new("run", "to move quickly");

        assert!(c.knows("run").unwrap());
        c.reveal(&entry).unwrap();
        assert!(!c.confirm(&entry).unwrap());

        let output = String::from_utf8(c.output).unwrap();
        assert!(output.contains("Word: run\nDo you know the meaning? (y/n): "));
        assert!(output.contains("Meaning: to move quickly\nIs this correct? (y/n): "));
    }
}
