//! Indentation measured in abstract units.

use serde::{Deserialize, Serialize};

/// One level of indentation.
///
/// In TOML this is either `indent = "tab"` or `indent = { spaces = 2 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentUnit {
    #[default]
    Tab,
    Spaces(usize),
}

impl IndentUnit {
    fn text(self) -> String {
        match self {
            IndentUnit::Tab => "\t".to_string(),
            IndentUnit::Spaces(n) => " ".repeat(n.max(1)),
        }
    }

    /// Whole units at the start of `line`, and their byte length.
    pub fn measure(self, line: &str) -> (usize, usize) {
        let unit = self.text();
        let mut rest = line;
        let mut units = 0;
        while let Some(stripped) = rest.strip_prefix(unit.as_str()) {
            rest = stripped;
            units += 1;
        }
        (units, line.len() - rest.len())
    }

    /// `line` with its whole leading units adjusted by `delta`, clamped at
    /// zero. Partial units and the rest of the line are kept as they are.
    pub fn reindent(self, line: &str, delta: i32) -> String {
        let (units, prefix_len) = self.measure(line);
        let target = if delta.is_negative() {
            units.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            units.saturating_add(delta.unsigned_abs() as usize)
        };
        let mut out = self.text().repeat(target);
        out.push_str(&line[prefix_len..]);
        out
    }
}

/// Leading spaces and tabs of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
