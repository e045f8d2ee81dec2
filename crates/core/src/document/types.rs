use std::fmt;

/// Line terminator used when a document is rendered back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Detect the terminator from the first line break in `text`.
    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }
}

/// An ordered, 0-indexed sequence of lines.
///
/// Line order is document order. Lines never carry their terminator; the
/// terminator seen first in the source is reused for every line on render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Document {
    /// Split source text into lines.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            line_ending: LineEnding::detect(text),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Build a document from already-split lines, rendered with `\n` and no
    /// trailing newline.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            line_ending: LineEnding::Lf,
            trailing_newline: false,
        }
    }

    /// Join the lines back into text.
    pub fn render(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut out = self.lines.join(ending);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(ending);
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
