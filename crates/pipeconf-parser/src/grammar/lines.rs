//! Line scanning

/// One physical line of input
#[derive(Debug, Clone, Copy)]
pub(super) struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Leading spaces/tabs, one column each
    pub indent: usize,
    /// The line without its terminator
    pub raw: &'a str,
    /// Content after the indentation, trailing whitespace removed
    pub text: &'a str,
}

impl<'a> Line<'a> {
    fn new(number: usize, raw: &'a str) -> Self {
        let indent = raw.len() - raw.trim_start_matches([' ', '\t']).len();
        Self {
            number,
            indent,
            raw,
            text: raw[indent..].trim_end(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Blank lines and full-line comments carry no structure
    pub fn is_insignificant(&self) -> bool {
        self.is_blank() || self.text.starts_with('#')
    }

    /// `-` on its own or followed by a space
    pub fn is_sequence_item(&self) -> bool {
        self.text == "-" || self.text.starts_with("- ")
    }

    /// Content starting `columns` columns in, for block scalar bodies
    pub fn content_from(&self, columns: usize) -> &'a str {
        self.raw.get(columns..).unwrap_or("")
    }
}

pub(super) fn scan(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| Line::new(idx + 1, raw))
        .collect()
}
