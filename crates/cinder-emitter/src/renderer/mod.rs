//! The statement/expression renderer: one instance renders one method at a
//! time, walking its tree exactly once. All per-method state lives here and
//! is reset by [`StatementRenderer::clear`] between methods. Distinct
//! instances share nothing mutable and may run on independent threads.

mod expressions;
mod locations;
mod statements;

use cinder_ast::TextLocation;
use rustc_hash::FxHashMap;

use crate::context::RenderingContext;
use crate::render_util::{self, KEYWORDS};
use crate::source_writer::SourceWriter;

pub struct StatementRenderer<'a> {
    context: &'a RenderingContext<'a>,
    writer: &'a mut SourceWriter,
    async_method: bool,
    /// Whether the cursor sits at the physical end of the part currently
    /// being rendered; lets a goto to the next part fall through.
    end: bool,
    current_part: u32,
    block_id_map: FxHashMap<String, String>,
    block_ids: Vec<String>,
    block_index_map: Vec<usize>,
    location_stack: Vec<TextLocation>,
    last_emitted_location: TextLocation,
}

impl<'a> StatementRenderer<'a> {
    pub fn new(context: &'a RenderingContext<'a>, writer: &'a mut SourceWriter) -> Self {
        Self {
            context,
            writer,
            async_method: false,
            end: false,
            current_part: 0,
            block_id_map: FxHashMap::default(),
            block_ids: Vec::new(),
            block_index_map: Vec::new(),
            location_stack: Vec::new(),
            last_emitted_location: TextLocation::empty(),
        }
    }

    /// Resets all per-method state. Must be called between methods; block
    /// labels, parts and location tracking never survive a method boundary.
    pub fn clear(&mut self) {
        self.block_id_map.clear();
        self.block_ids.clear();
        self.block_index_map.clear();
        self.current_part = 0;
        self.end = false;
        self.async_method = false;
        self.location_stack.clear();
        self.last_emitted_location = TextLocation::empty();
    }

    pub fn is_async(&self) -> bool {
        self.async_method
    }

    /// Marks the method being rendered as suspension-capable.
    pub fn set_async(&mut self, async_method: bool) {
        self.async_method = async_method;
    }

    pub fn set_current_part(&mut self, part: u32) {
        self.current_part = part;
    }

    pub fn set_end(&mut self, end: bool) {
        self.end = end;
    }

    pub fn context(&self) -> &RenderingContext<'a> {
        self.context
    }

    pub fn writer(&mut self) -> &mut SourceWriter {
        self.writer
    }

    pub fn variable_name(&self, index: usize) -> String {
        self.context.naming().variable_name(index)
    }

    /// Resolves an abstract block id to its emitted label, minting a fresh
    /// compact label on first use.
    pub(crate) fn map_block_id(&mut self, id: &str) -> String {
        if let Some(name) = self.block_id_map.get(id) {
            return name.clone();
        }
        let index = self.block_id_map.len();
        let name = self.generate_block_id(index);
        tracing::trace!(block_id = id, label = %name, "mapped block id");
        self.block_id_map.insert(id.to_owned(), name.clone());
        name
    }

    fn generate_block_id(&mut self, index: usize) -> String {
        while self.block_ids.len() <= index {
            let mut mapped = self.block_index_map.last().map_or(0, |last| last + 1);
            while KEYWORDS.contains(render_util::index_to_id(mapped).as_str()) {
                mapped += 1;
            }
            self.block_index_map.push(mapped);
            self.block_ids.push(render_util::index_to_id(mapped));
        }
        self.block_ids[index].clone()
    }

    /// Emits the guard that leaves the dispatch loop when the runtime signals
    /// a pending suspension, preserving the resumption pointer and any
    /// already-evaluated temporary.
    pub fn emit_suspend_checker(&mut self) {
        self.writer.write("if");
        self.writer.write_space();
        self.writer.write_char('(');
        let suspending = self.context.naming().function_name("$rt_suspending");
        self.writer.write(&suspending);
        self.writer.write("())");
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.increase_indent();
        self.writer.write_line();
        self.writer.write("break ");
        self.writer.write(self.context.main_loop_name());
        self.writer.write_char(';');
        self.writer.write_line();
        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_line();
    }
}
