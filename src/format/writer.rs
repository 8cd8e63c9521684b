//! Output writer with indentation tracking

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    config: FormatConfig,
    at_line_start: bool,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    pub fn write_char(&mut self, c: char) {
        self.write_indent();
        self.output.push(c);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write blank lines (for spacing between declarations)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> FormatWriter {
        FormatWriter::new(FormatConfig::default())
    }

    #[test]
    fn test_write_and_newline() {
        let mut writer = default_writer();
        writer.write("hello");
        writer.write("");
        writer.write_char('!');
        writer.newline();
        assert_eq!(writer.finish(), "hello!\n");
    }

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        writer.writeln("x");
        assert_eq!(writer.finish(), "x\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut writer = FormatWriter::new(FormatConfig::new().with_indent_width(2));
        writer.writeln("class A {");
        writer.indent();
        writer.writeln("fn f() {");
        writer.indent();
        writer.writeln("return;");
        writer.dedent();
        writer.writeln("}");
        writer.dedent();
        writer.writeln("}");
        assert_eq!(writer.finish(), "class A {\n  fn f() {\n    return;\n  }\n}\n");
    }

    #[test]
    fn test_blank_lines_do_not_indent() {
        let mut writer = default_writer();
        writer.indent();
        writer.writeln("a;");
        writer.blank_lines(1);
        writer.writeln("b;");
        assert_eq!(writer.finish(), "    a;\n\n    b;\n");
    }
}
