//! Console transcript.
//!
//! Every user-facing message goes here. The TUI shows the tail of the
//! transcript and the binary prints all of it to stdout on exit.

/// Ordered list of console lines.
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    /// Empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn say(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "console", "{}", line);
        self.lines.push(line);
    }

    /// Every line so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The last `n` lines.
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    /// Position of the next line to be written, for slicing with [`Console::since`].
    pub fn mark(&self) -> usize {
        self.lines.len()
    }

    /// Lines written since `mark`.
    pub fn since(&self, mark: usize) -> &[String] {
        &self.lines[mark.min(self.lines.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_and_since() {
        let mut console = Console::new();
        console.say("one");
        let mark = console.mark();
        console.say("two");
        console.say(String::from("three"));
        assert_eq!(console.tail(2), ["two", "three"]);
        assert_eq!(console.tail(10).len(), 3);
        assert_eq!(console.since(mark), ["two", "three"]);
        assert_eq!(console.lines().len(), 3);
    }
}
