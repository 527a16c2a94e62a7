//! Stat counters that count up to the number in their label.

pub const COUNT_DURATION_MS: f64 = 2000.0;
pub const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    target: u64,
    value: f64,
    increment: f64,
    suffix: &'static str,
    done: bool,
}

impl Counter {
    /// A counter for labels like "50M+" or "25+"; `None` when the label has
    /// no marker or no non-zero number.
    pub fn from_label(label: &str) -> Option<Self> {
        if !label.contains('+') && !label.contains('M') {
            return None;
        }
        let digits: String = label.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok().filter(|n| *n > 0)?;
        let suffix = if label.contains('M') { "M+" } else { "+" };
        Some(Self {
            target,
            value: 0.0,
            increment: target as f64 / (COUNT_DURATION_MS / FRAME_MS),
            suffix,
            done: false,
        })
    }

    /// Advances one animation frame.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        self.value += self.increment;
        if self.value >= self.target as f64 {
            self.done = true;
        }
    }

    pub fn text(&self) -> String {
        if self.done {
            format!("{}{}", self.target, self.suffix)
        } else {
            format!("{}{}", self.value.floor() as u64, self.suffix)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels() {
        assert!(Counter::from_label("Since 1865").is_none());
        assert!(Counter::from_label("0+").is_none());
        assert!(Counter::from_label("Many+").is_none());
        assert_eq!(Counter::from_label("50M+").unwrap().suffix, "M+");
        assert_eq!(Counter::from_label("25+").unwrap().target, 25);
    }

    #[test]
    fn counts_up_and_lands_on_target() {
        let mut counter = Counter::from_label("100M+").unwrap();
        counter.step();
        assert_eq!(counter.text(), "0M+");
        for _ in 0..60 {
            counter.step();
        }
        assert_eq!(counter.text(), "48M+");
        assert!(!counter.is_done());

        for _ in 0..100 {
            counter.step();
        }
        assert!(counter.is_done());
        assert_eq!(counter.text(), "100M+");
    }
}
