//! Report — Renders an explanation tree as indented text
//!
//! ```text
//! FAILURE: [both [anything] and [not [anything]]] on [0]
//! 	Matcher: [both [anything] and [not [anything]]]
//! 	Because: [second part of 'Both/And' did not match]
//! 		Matcher: [anything]
//! 		Because: [Matched]
//! 		Matcher: [not [anything]]
//! 		Because: [Matched]
//! 			Matcher: [anything]
//! 			Because: [Matched]
//! ```
//!
//! A node at depth `d` is indented by `d + 1` tabs. Comments attached to a
//! node's matcher are printed verbatim between its `Matcher:` and `Because:`
//! lines.

use crate::MatchResult;
use std::fmt;

const NONE: &str = "<none>";

/// Display adapter over a [`MatchResult`] tree.
///
/// Lines are separated by `\n`; there is no trailing newline.
#[derive(Clone, Copy)]
pub struct Report<'a> {
    root: &'a MatchResult,
}

impl<'a> Report<'a> {
    /// Create a report rooted at `root`.
    #[must_use]
    pub fn new(root: &'a MatchResult) -> Self {
        Self { root }
    }

    /// Render into any text sink.
    ///
    /// # Errors
    ///
    /// Propagates errors reported by the sink.
    pub fn format_into(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        let outcome = if self.root.matched() { "MATCHED" } else { "FAILURE" };
        write!(sink, "{outcome}: [")?;
        write_matcher(self.root, sink)?;
        sink.write_str("] on [")?;
        match self.root.value() {
            Some(v) => write!(sink, "{v}")?,
            None => sink.write_str(NONE)?,
        }
        sink.write_char(']')?;
        write_node(self.root, 0, sink)
    }
}

fn write_matcher(node: &MatchResult, sink: &mut dyn fmt::Write) -> fmt::Result {
    match node.matcher() {
        Some(m) => m.format_into(sink),
        None => sink.write_str(NONE),
    }
}

fn indent(depth: usize, sink: &mut dyn fmt::Write) -> fmt::Result {
    sink.write_char('\n')?;
    for _ in 0..=depth {
        sink.write_char('\t')?;
    }
    Ok(())
}

fn write_node(node: &MatchResult, depth: usize, sink: &mut dyn fmt::Write) -> fmt::Result {
    indent(depth, sink)?;
    sink.write_str("Matcher: [")?;
    write_matcher(node, sink)?;
    sink.write_char(']')?;

    if let Some(m) = node.matcher() {
        for comment in m.comments() {
            indent(depth, sink)?;
            write!(sink, "Comment: {comment}")?;
        }
    }

    indent(depth, sink)?;
    sink.write_str("Because: [")?;
    node.format_into(sink)?;
    sink.write_char(']')?;

    for cause in node.causes() {
        write_node(cause, depth + 1, sink)?;
    }
    Ok(())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_into(f)
    }
}

impl fmt::Debug for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
