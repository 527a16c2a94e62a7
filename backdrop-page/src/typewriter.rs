use backdrop_core::Millis;

pub const START_DELAY_MS: Millis = 500.0;
pub const CHAR_INTERVAL_MS: Millis = 120.0;

/// Reveals a title one character at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    text: String,
    started_at: Millis,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, started_at: Millis) -> Self {
        Self { text: text.into(), started_at }
    }

    /// Characters shown at `now`: the first after the start delay, then one
    /// per interval.
    pub fn revealed_chars(&self, now: Millis) -> usize {
        let elapsed = now - self.started_at - START_DELAY_MS;
        if elapsed < 0.0 {
            return 0;
        }
        let typed = (elapsed / CHAR_INTERVAL_MS).floor() as usize + 1;
        typed.min(self.text.chars().count())
    }

    pub fn visible(&self, now: Millis) -> &str {
        let count = self.revealed_chars(now);
        match self.text.char_indices().nth(count) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_done(&self, now: Millis) -> bool {
        self.revealed_chars(now) == self.text.chars().count()
    }
}
