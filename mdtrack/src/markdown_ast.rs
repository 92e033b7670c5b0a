//! Positioned markdown block tree
//!
//! Converts pulldown-cmark's offset event stream into the block nodes the
//! item extractor consumes: headings, lists, and list items, each annotated
//! with 1-indexed line/column spans computed from byte offsets. Task-list
//! markers surface as a tri-state `checked` flag distinguishing "not a
//! checkbox", "unchecked", and "checked". Every other block construct is
//! consumed and dropped.

use crate::item_model::Position;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// A block-level node with its source span
#[derive(Debug, Clone)]
pub enum BlockNode {
    /// An ATX or setext heading
    Heading {
        /// Heading level (1-6)
        depth: u32,
        /// Flattened inline text of the heading
        text: String,
        /// Span of the heading's own line(s)
        position: Position,
    },

    /// A top-level list (ordered or unordered)
    List(ListNode),
}

/// A list with its items
#[derive(Debug, Clone)]
pub struct ListNode {
    /// Whether the list is numbered
    pub ordered: bool,

    /// Items in document order
    pub items: Vec<ListItemNode>,

    /// Span of the whole list
    pub position: Position,
}

/// A single list item
#[derive(Debug, Clone)]
pub struct ListItemNode {
    /// Tri-state checkbox indicator: `None` = not a checkbox
    pub checked: Option<bool>,

    /// Flattened inline text of the item's first paragraph
    pub text: String,

    /// Lists nested directly under this item
    pub nested: Vec<ListNode>,

    /// Span of the item, nested content included
    pub position: Position,
}

/// Parse markdown text into positioned block nodes
///
/// # Parameters
/// * `source` - Raw markdown content (`\n` line endings)
///
/// # Returns
/// * `Vec<BlockNode>` - Headings and top-level lists in document order
pub fn parse_blocks(source: &str) -> Vec<BlockNode> {
    AstBuilder::parse(source)
}

/// Byte-offset to line/column conversion table
///
/// Records the byte offset of every line start once, so each lookup is a
/// binary search instead of a text rescan.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-indexed (line, column) of a byte offset
    fn location(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.line_starts[line];
        (line as u32 + 1, column as u32 + 1)
    }
}

/// Builder state while consuming the event stream
struct AstBuilder<'a> {
    source: &'a str,
    index: LineIndex,

    /// Finished top-level nodes
    blocks: Vec<BlockNode>,

    /// Stack of lists being built (innermost last)
    list_stack: Vec<ListBuilder>,

    /// Heading currently collecting inline text
    heading: Option<HeadingBuilder>,

    /// Nesting depth of containers whose content is dropped entirely
    /// (blockquotes, tables, footnote definitions, suppressed headings)
    suppress_depth: usize,

    /// Inside a code block; its text events are not inline content
    in_code_block: bool,
}

struct HeadingBuilder {
    depth: u32,
    text: String,
    position: Position,
}

struct ListBuilder {
    ordered: bool,
    items: Vec<ListItemNode>,
    current_item: Option<ItemBuilder>,
    position: Position,
}

struct ItemBuilder {
    checked: Option<bool>,
    text: String,
    /// The first paragraph has closed; later inline text is ignored
    content_done: bool,
    nested: Vec<ListNode>,
    position: Position,
}

impl<'a> AstBuilder<'a> {
    fn parse(source: &'a str) -> Vec<BlockNode> {
        let mut builder = Self {
            source,
            index: LineIndex::new(source),
            blocks: Vec::new(),
            list_stack: Vec::new(),
            heading: None,
            suppress_depth: 0,
            in_code_block: false,
        };

        let parser = Parser::new_ext(source, Options::ENABLE_TASKLISTS);
        for (event, range) in parser.into_offset_iter() {
            builder.process_event(event, &range);
        }

        log::debug!(
            "parsed {} block nodes from {} bytes",
            builder.blocks.len(),
            source.len()
        );

        builder.blocks
    }

    fn process_event(&mut self, event: Event<'_>, range: &Range<usize>) {
        match event {
            Event::Start(tag) => self.handle_start_tag(tag, range),
            Event::End(tag_end) => self.handle_end_tag(tag_end),
            Event::Text(text) => {
                if !self.in_code_block {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => self.push_text(&code),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            Event::TaskListMarker(checked) => self.handle_task_marker(checked),
            // Rules, HTML, math, and footnote references carry no trackable
            // content.
            _ => {}
        }
    }

    fn handle_start_tag(&mut self, tag: Tag<'_>, range: &Range<usize>) {
        match tag {
            Tag::Heading { level, .. } => {
                // Headings inside lists or dropped containers are not
                // top-level blocks; swallow their text too.
                if self.suppress_depth > 0 || !self.list_stack.is_empty() {
                    self.suppress_depth += 1;
                } else {
                    self.heading = Some(HeadingBuilder {
                        depth: level as u32,
                        text: String::new(),
                        position: self.span(range),
                    });
                }
            }
            Tag::List(start) => {
                let position = self.span(range);
                // A nested list ends its parent item's content phase.
                if let Some(item) = self.current_item_mut() {
                    item.content_done = true;
                }
                self.list_stack.push(ListBuilder {
                    ordered: start.is_some(),
                    items: Vec::new(),
                    current_item: None,
                    position,
                });
            }
            Tag::Item => {
                let position = self.span(range);
                if let Some(list) = self.list_stack.last_mut() {
                    list.current_item = Some(ItemBuilder {
                        checked: None,
                        text: String::new(),
                        content_done: false,
                        nested: Vec::new(),
                        position,
                    });
                }
            }
            Tag::BlockQuote(_) | Tag::Table(_) | Tag::FootnoteDefinition(_) => {
                self.suppress_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = true;
            }
            _ => {}
        }
    }

    fn handle_end_tag(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_) => self.finish_heading(),
            TagEnd::List(_) => self.finish_list(),
            TagEnd::Item => self.finish_item(),
            TagEnd::Paragraph => {
                if self.suppress_depth == 0 {
                    if let Some(item) = self.current_item_mut() {
                        item.content_done = true;
                    }
                }
            }
            TagEnd::BlockQuote(_) | TagEnd::Table | TagEnd::FootnoteDefinition => {
                self.suppress_depth = self.suppress_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
            }
            _ => {}
        }
    }

    /// Route inline text to whatever is currently collecting it
    fn push_text(&mut self, text: &str) {
        if self.suppress_depth > 0 {
            return;
        }
        if let Some(heading) = self.heading.as_mut() {
            heading.text.push_str(text);
            return;
        }
        if let Some(item) = self.current_item_mut() {
            if !item.content_done {
                item.text.push_str(text);
            }
        }
    }

    fn handle_task_marker(&mut self, checked: bool) {
        if let Some(item) = self.current_item_mut() {
            item.checked = Some(checked);
        }
    }

    fn finish_heading(&mut self) {
        let Some(heading) = self.heading.take() else {
            // A suppressed heading ended.
            self.suppress_depth = self.suppress_depth.saturating_sub(1);
            return;
        };

        self.blocks.push(BlockNode::Heading {
            depth: heading.depth,
            text: heading.text.trim().to_string(),
            position: heading.position,
        });
    }

    fn finish_item(&mut self) {
        let Some(list) = self.list_stack.last_mut() else {
            return;
        };
        let Some(item) = list.current_item.take() else {
            return;
        };

        list.items.push(ListItemNode {
            checked: item.checked,
            text: item.text.trim().to_string(),
            nested: item.nested,
            position: item.position,
        });
    }

    fn finish_list(&mut self) {
        let Some(list) = self.list_stack.pop() else {
            return;
        };

        let node = ListNode {
            ordered: list.ordered,
            items: list.items,
            position: list.position,
        };

        if self.suppress_depth > 0 {
            // The list lives inside a dropped container (e.g. a blockquote);
            // it is not a direct child of an item or of the document.
            return;
        }

        if let Some(item) = self.current_item_mut() {
            item.nested.push(node);
        } else {
            self.blocks.push(BlockNode::List(node));
        }
    }

    /// The innermost list's item under construction, if any
    fn current_item_mut(&mut self) -> Option<&mut ItemBuilder> {
        self.list_stack
            .last_mut()
            .and_then(|list| list.current_item.as_mut())
    }

    /// Convert a byte range to a position, trimming trailing whitespace
    ///
    /// pulldown-cmark block ranges run up to the start of the following
    /// block; the recorded end must address one past the last content byte
    /// instead.
    fn span(&self, range: &Range<usize>) -> Position {
        let start = range.start.min(self.source.len());
        let end = range.end.min(self.source.len());
        let trimmed_end = start + self.source[start..end].trim_end().len();

        let (line, column) = self.index.location(start);
        let (end_line, end_column) = self.index.location(trimmed_end);
        Position::new(line, column, end_line, end_column)
    }
}
