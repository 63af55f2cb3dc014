//! Letters-then-digits masks such as `wwwww-ddddd`.
//!
//! Every edit on a masked field is resolved by taking the prospective text,
//! keeping only letters and digits, and rebuilding the formatted value from
//! scratch. The separator is never typed by the user; it is inserted here.

use crate::error::ConfigError;

/// How stripped characters are assigned to the letter and digit runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaskFill {
    /// Letters fill the letter run and digits fill the digit run, each in
    /// the order typed. Characters that fit neither run are dropped.
    #[default]
    Slotted,
    /// Each stripped character keeps its index: indices inside the letter
    /// run accept only letters, indices inside the digit run accept only
    /// digits, and a mismatch is dropped for good.
    Positional,
}

/// A fixed `letters separator digits` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    letter_run: usize,
    digit_run: usize,
    separator: char,
    fill: MaskFill,
}

impl Default for Mask {
    /// The `wwwww-ddddd` mask.
    fn default() -> Self {
        Self {
            letter_run: 5,
            digit_run: 5,
            separator: '-',
            fill: MaskFill::default(),
        }
    }
}

impl Mask {
    /// Create a mask with the default [`MaskFill::Slotted`] strategy.
    pub fn new(letter_run: usize, digit_run: usize, separator: char) -> Result<Self, ConfigError> {
        if letter_run == 0 {
            return Err(ConfigError::EmptyMaskRun("letter"));
        }
        if digit_run == 0 {
            return Err(ConfigError::EmptyMaskRun("digit"));
        }
        if separator.is_alphanumeric() {
            return Err(ConfigError::AlphanumericSeparator(separator));
        }
        Ok(Self {
            letter_run,
            digit_run,
            separator,
            fill: MaskFill::default(),
        })
    }

    /// Switch the fill strategy.
    pub fn with_fill(mut self, fill: MaskFill) -> Self {
        self.fill = fill;
        self
    }

    pub fn letter_run(&self) -> usize {
        self.letter_run
    }

    pub fn digit_run(&self) -> usize {
        self.digit_run
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn fill(&self) -> MaskFill {
        self.fill
    }

    /// Number of characters in a completely filled value, separator included.
    pub fn formatted_len(&self) -> usize {
        self.letter_run + 1 + self.digit_run
    }

    /// A placeholder such as `wwwww-ddddd`.
    pub fn placeholder(&self) -> String {
        let mut out = "w".repeat(self.letter_run);
        out.push(self.separator);
        out.push_str(&"d".repeat(self.digit_run));
        out
    }

    /// Rebuild `text` into the mask format.
    pub fn rebuild(&self, text: &str) -> String {
        match self.fill {
            MaskFill::Slotted => self.rebuild_slotted(text),
            MaskFill::Positional => self.rebuild_positional(text),
        }
    }

    fn rebuild_slotted(&self, text: &str) -> String {
        let mut letters = String::new();
        let mut digits = String::new();
        let mut letter_count = 0;
        let mut digit_count = 0;
        let mut kept = 0;
        for c in text.chars().filter(|c| c.is_alphanumeric()) {
            kept += 1;
            if c.is_alphabetic() {
                if letter_count < self.letter_run {
                    letters.push(c);
                    letter_count += 1;
                }
            } else if digit_count < self.digit_run {
                digits.push(c);
                digit_count += 1;
            }
        }

        let mut out = letters;
        if letter_count == self.letter_run && (digit_count > 0 || kept > self.letter_run) {
            out.push(self.separator);
        }
        out.push_str(&digits);
        out
    }

    fn rebuild_positional(&self, text: &str) -> String {
        let capacity = self.letter_run + self.digit_run;
        let mut out = String::new();
        for (index, c) in text
            .chars()
            .filter(|c| c.is_alphanumeric())
            .take(capacity)
            .enumerate()
        {
            if index == self.letter_run {
                out.push(self.separator);
            }
            let keep = if index < self.letter_run {
                c.is_alphabetic()
            } else {
                c.is_numeric()
            };
            if keep {
                out.push(c);
            }
        }
        out
    }
}
