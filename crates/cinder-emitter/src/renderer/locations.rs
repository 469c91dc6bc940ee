//! Source-location tracking: a stack mirroring syntactic nesting plus
//! minimal delta emission against the last *emitted* location. Transitions
//! between different inlining chains close the scopes no longer common to
//! both, innermost-first, then open the newly entered ones, outermost-first.

use std::sync::Arc;

use cinder_ast::TextLocation;

use super::StatementRenderer;

impl StatementRenderer<'_> {
    /// Pushes the location of the node being entered. `None` means the node
    /// carries no location; entering it suppresses the surrounding one.
    pub fn push_location(&mut self, location: Option<&TextLocation>) {
        let previous = self.location_stack.last();
        match location {
            Some(location) => {
                if previous != Some(location) {
                    self.emit_location_delta(location.clone());
                }
                self.location_stack.push(location.clone());
            }
            None => {
                if previous.is_some() {
                    self.emit_location_delta(TextLocation::empty());
                }
                self.location_stack.push(TextLocation::empty());
            }
        }
    }

    /// Pops the innermost location, re-emitting the surrounding one when it
    /// differs. Popping the outermost level clears tracked state so an
    /// identical later push is a fresh change, not a no-op.
    pub fn pop_location(&mut self) {
        let Some(popped) = self.location_stack.pop() else {
            return;
        };
        match self.location_stack.last() {
            Some(entry) => {
                if *entry != popped {
                    let entry = entry.clone();
                    self.emit_location_delta(entry);
                }
            }
            None => self.emit_location_delta(TextLocation::empty()),
        }
    }

    fn emit_location_delta(&mut self, location: TextLocation) {
        if self.last_emitted_location == location {
            return;
        }

        let mut file_name = self.last_emitted_location.file_name.clone();
        let mut line = self.last_emitted_location.line;
        if self.last_emitted_location.inlining != location.inlining {
            let new_path = location.inlining_path();
            let prev_path = self.last_emitted_location.inlining_path();

            let mut path_index = 0;
            while path_index < prev_path.len()
                && path_index < new_path.len()
                && prev_path[path_index] == new_path[path_index]
            {
                path_index += 1;
            }
            let last_common = if path_index > 0 {
                Some(prev_path[path_index - 1].clone())
            } else {
                None
            };

            // Close abandoned scopes, innermost first, restoring the call
            // site of each one on the way out.
            let mut prev_inlining = self.last_emitted_location.inlining.clone();
            while prev_inlining != last_common {
                let Some(info) = prev_inlining else {
                    break;
                };
                self.writer.exit_location();
                file_name = info.file_name.clone();
                line = info.line;
                prev_inlining = info.parent.clone();
            }

            // Open newly entered scopes, outermost first, each preceded by
            // its call-site line.
            for inlining in &new_path[path_index..] {
                self.emit_simple_location(
                    &file_name,
                    line,
                    inlining.file_name.clone(),
                    inlining.line,
                );
                file_name = None;
                line = u32::MAX;
                self.writer.enter_location(inlining.method.clone());
            }
        }

        self.emit_simple_location(&file_name, line, location.file_name.clone(), location.line);
        self.last_emitted_location = location;
    }

    fn emit_simple_location(
        &mut self,
        old_file: &Option<Arc<str>>,
        old_line: u32,
        new_file: Option<Arc<str>>,
        new_line: u32,
    ) {
        if *old_file == new_file && old_line == new_line {
            return;
        }
        self.writer.emit_line(new_file, new_line);
    }
}
