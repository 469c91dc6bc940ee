//! Output sink for one method render: accumulates the emitted JavaScript and
//! an interleaved stream of location-delta events for debug-map builders.

use std::sync::Arc;

use cinder_ast::MethodReference;

/// A debug-map event, positioned by byte offset into the emitted text.
/// `Line` with no file marks "location unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationEvent {
    Line {
        file_name: Option<Arc<str>>,
        line: u32,
    },
    /// Entered an inlined method's scope.
    Enter { method: MethodReference },
    /// Left the innermost inlined scope.
    Exit,
}

const INDENT: &str = "    ";

/// Exclusively-owned text sink for the duration of one render call. In
/// minifying mode all cosmetic whitespace collapses; location events are
/// recorded either way. Nothing is retracted on failure.
#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    events: Vec<(usize, LocationEvent)>,
    indent_level: usize,
    minifying: bool,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(minifying: bool) -> Self {
        Self {
            output: String::new(),
            events: Vec::new(),
            indent_level: 0,
            minifying,
            at_line_start: false,
        }
    }

    pub fn is_minifying(&self) -> bool {
        self.minifying
    }

    /// Write text, applying any pending indentation first.
    pub fn write(&mut self, text: &str) {
        self.flush_indent();
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        self.flush_indent();
        self.output.push(ch);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.flush_indent();
        self.output.push_str(&value.to_string());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.flush_indent();
        self.output.push_str(&value.to_string());
    }

    /// Cosmetic space, dropped when minifying.
    pub fn write_space(&mut self) {
        if !self.minifying {
            self.flush_indent();
            self.output.push(' ');
        }
    }

    /// Cosmetic newline, dropped when minifying.
    pub fn write_line(&mut self) {
        if !self.minifying {
            self.output.push('\n');
            self.at_line_start = true;
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn flush_indent(&mut self) {
        if self.at_line_start {
            self.at_line_start = false;
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
        }
    }

    // =========================================================================
    // Location events
    // =========================================================================

    pub fn emit_line(&mut self, file_name: Option<Arc<str>>, line: u32) {
        self.events
            .push((self.output.len(), LocationEvent::Line { file_name, line }));
    }

    pub fn enter_location(&mut self, method: MethodReference) {
        self.events
            .push((self.output.len(), LocationEvent::Enter { method }));
    }

    pub fn exit_location(&mut self) {
        self.events.push((self.output.len(), LocationEvent::Exit));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn events(&self) -> &[(usize, LocationEvent)] {
        &self.events
    }

    pub fn into_output(self) -> String {
        self.output
    }

    pub fn into_parts(self) -> (String, Vec<(usize, LocationEvent)>) {
        (self.output, self.events)
    }
}
