//! Width-aware document printer
//!
//! Renders a [`Doc`] to text. Groups are printed flat when their contents
//! (and whatever follows up to the next possible break) fit in the remaining
//! width, and broken otherwise.

use unicode_width::UnicodeWidthStr;

use super::{Doc, Line};

/// Target line width
pub const DEFAULT_WIDTH: usize = 80;

/// Indentation size (2 spaces)
pub const DEFAULT_TAB_WIDTH: usize = 2;

static HARDLINE: Doc = Doc::Line(Line::Hard);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub width: usize,
    pub tab_width: usize,
    pub use_tabs: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            use_tabs: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Break,
    Flat,
}

/// Pending work item: indentation level, layout mode and the document.
type Command<'d> = (usize, Mode, &'d Doc);

/// Render a document to a string.
pub fn print_doc(doc: &Doc, options: &PrintOptions) -> String {
    let mut printer = Printer {
        options,
        output: String::new(),
        column: 0,
    };
    printer.run(doc);
    printer.output
}

struct Printer<'o> {
    options: &'o PrintOptions,
    output: String,
    column: usize,
}

impl Printer<'_> {
    fn run<'d>(&mut self, root: &'d Doc) {
        let mut commands: Vec<Command<'d>> = vec![(0, Mode::Break, root)];
        let mut line_suffix: Vec<Command<'d>> = Vec::new();

        loop {
            let Some((level, mode, doc)) = commands.pop() else {
                if line_suffix.is_empty() {
                    break;
                }
                commands.extend(line_suffix.drain(..).rev());
                continue;
            };
            match doc {
                Doc::Text(s) => self.write(s),
                Doc::Concat(parts) => {
                    for part in parts.iter().rev() {
                        commands.push((level, mode, part));
                    }
                }
                Doc::Indent(inner) => commands.push((level + 1, mode, &**inner)),
                Doc::Group(inner) => {
                    let next = match mode {
                        Mode::Flat => Mode::Flat,
                        Mode::Break => {
                            let remaining = self.options.width as isize - self.column as isize;
                            if !inner.has_forced_break() && fits(inner, &commands, remaining) {
                                Mode::Flat
                            } else {
                                Mode::Break
                            }
                        }
                    };
                    commands.push((level, next, &**inner));
                }
                Doc::LineSuffix(inner) => line_suffix.push((level, mode, &**inner)),
                Doc::LineSuffixBoundary => {
                    if !line_suffix.is_empty() {
                        commands.push((level, Mode::Break, &HARDLINE));
                    }
                }
                Doc::BreakParent => {}
                Doc::Line(kind) => {
                    if mode == Mode::Flat {
                        match kind {
                            Line::Soft => continue,
                            Line::Normal => {
                                self.write(" ");
                                continue;
                            }
                            Line::Hard | Line::Literal => {}
                        }
                    }
                    if !line_suffix.is_empty() {
                        // Emit deferred suffixes first, then retry this break.
                        commands.push((level, mode, doc));
                        commands.extend(line_suffix.drain(..).rev());
                        continue;
                    }
                    if *kind == Line::Literal {
                        self.output.push('\n');
                        self.column = 0;
                    } else {
                        self.newline(level);
                    }
                }
            }
        }
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
        self.column += text.width();
    }

    fn newline(&mut self, level: usize) {
        let trimmed = self.output.trim_end_matches([' ', '\t']).len();
        self.output.truncate(trimmed);
        self.output.push('\n');
        if self.options.use_tabs {
            self.output.push_str(&"\t".repeat(level));
        } else {
            self.output.push_str(&" ".repeat(level * self.options.tab_width));
        }
        self.column = level * self.options.tab_width;
    }
}

/// Whether `next`, printed flat, plus the rest of the current line fits in
/// `remaining` columns.
fn fits(next: &Doc, rest: &[Command<'_>], mut remaining: isize) -> bool {
    let mut stack: Vec<(Mode, &Doc)> = vec![(Mode::Flat, next)];
    let mut rest_index = rest.len();

    loop {
        if remaining < 0 {
            return false;
        }
        let (mode, doc) = match stack.pop() {
            Some(item) => item,
            None => {
                if rest_index == 0 {
                    return true;
                }
                rest_index -= 1;
                let (_, mode, doc) = rest[rest_index];
                (mode, doc)
            }
        };

        match doc {
            Doc::Text(s) => remaining -= s.width() as isize,
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    stack.push((mode, part));
                }
            }
            Doc::Indent(inner) => stack.push((mode, &**inner)),
            Doc::Group(inner) => {
                let group_mode = if inner.has_forced_break() { Mode::Break } else { mode };
                stack.push((group_mode, &**inner));
            }
            Doc::Line(kind) => {
                if mode == Mode::Break || matches!(kind, Line::Hard | Line::Literal) {
                    return true;
                }
                if *kind == Line::Normal {
                    remaining -= 1;
                }
            }
            Doc::LineSuffix(_) | Doc::LineSuffixBoundary | Doc::BreakParent => {}
        }
    }
}
