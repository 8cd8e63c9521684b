//! Formatting configuration for datagen sources

/// Formatting configuration
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Quote style for strings
    pub quote_style: QuoteStyle,
    /// Number of blank lines between top-level declarations (imports are grouped without blanks)
    pub blank_lines_top_level: usize,
    /// Number of blank lines around non-field class members (consecutive fields stay together)
    pub blank_lines_members: usize,
}

/// Quote style for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
}

impl QuoteStyle {
    pub fn quote_char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            quote_style: QuoteStyle::Double,
            blank_lines_top_level: 1,
            blank_lines_members: 1,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the quote style
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Set the number of blank lines between top-level declarations
    pub fn with_blank_lines_top_level(mut self, count: usize) -> Self {
        self.blank_lines_top_level = count;
        self
    }

    /// Set the number of blank lines around non-field members
    pub fn with_blank_lines_members(mut self, count: usize) -> Self {
        self.blank_lines_members = count;
        self
    }
}
