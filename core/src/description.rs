//! `Description` — Deferred formatting for explanations
//!
//! A description is a format template plus the captured arguments that fill
//! it. Nothing is stringified until the description is rendered, and most
//! descriptions never are: a passing assertion prints nothing.
//!
//! # Template Syntax
//!
//! - `{}` — the next captured argument (rendered with `Display`)
//! - `{{` / `}}` — a literal brace
//!
//! A placeholder without an argument renders as `{!missing}`; arguments left
//! over after the template is exhausted are appended as ` {!extra: ...}`.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// A captured description argument.
///
/// Arguments are shared handles so that cloning a [`Description`] (or the
/// matcher and result that own it) never copies or renders them.
pub type Arg = Arc<dyn fmt::Display + Send + Sync>;

/// Capture a value as a description argument.
///
/// Used by the [`describe!`](crate::describe) macro; call it directly when
/// building argument lists by hand.
pub fn arg<T>(value: T) -> Arg
where
    T: fmt::Display + Send + Sync + 'static,
{
    Arc::new(value)
}

/// A lazily rendered, immutable text fragment.
///
/// # INV: Rendering is pure
///
/// Rendering re-evaluates the template against the captured arguments on
/// every call, yields identical text each time and never mutates the
/// arguments.
///
/// # Example
///
/// ```
/// use attest::{describe, Description};
///
/// let description = describe!("greater than {}", 3);
/// assert_eq!(description.to_string(), "greater than 3");
///
/// // Literal text is never treated as a template.
/// let literal = Description::text("100% {}");
/// assert_eq!(literal.to_string(), "100% {}");
/// ```
#[derive(Clone)]
pub struct Description {
    inner: Arc<Inner>,
}

struct Inner {
    template: Cow<'static, str>,
    args: Vec<Arg>,
    literal: bool,
}

impl Description {
    /// Create a description from a template and its captured arguments.
    pub fn new(template: impl Into<Cow<'static, str>>, args: Vec<Arg>) -> Self {
        Self {
            inner: Arc::new(Inner {
                template: template.into(),
                args,
                literal: false,
            }),
        }
    }

    /// Create a description that renders `text` verbatim.
    ///
    /// Braces in `text` are not placeholders.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                template: text.into(),
                args: Vec::new(),
                literal: true,
            }),
        }
    }

    /// Returns the raw template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.inner.template
    }

    /// Returns the captured arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.inner.args
    }

    /// Returns `true` if this description renders to the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.template.is_empty() && self.inner.args.is_empty()
    }

    /// Returns `true` if both handles share the same underlying description.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Render into any text sink.
    ///
    /// # Errors
    ///
    /// Propagates errors reported by the sink.
    pub fn format_into(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        if self.inner.literal {
            return sink.write_str(&self.inner.template);
        }
        render(&self.inner.template, &self.inner.args, sink)
    }
}

fn render(template: &str, args: &[Arg], sink: &mut dyn fmt::Write) -> fmt::Result {
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        sink.write_str(&rest[..pos])?;
        let tail = &rest[pos..];
        if tail.starts_with("{{") {
            sink.write_char('{')?;
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            sink.write_char('}')?;
            rest = &tail[2..];
        } else if tail.starts_with("{}") {
            match args.next() {
                Some(arg) => write!(sink, "{arg}")?,
                None => sink.write_str("{!missing}")?,
            }
            rest = &tail[2..];
        } else {
            // Lone brace: both '{' and '}' are one byte.
            sink.write_str(&tail[..1])?;
            rest = &tail[1..];
        }
    }
    sink.write_str(rest)?;

    let mut extra = args.peekable();
    if extra.peek().is_some() {
        sink.write_str(" {!extra: ")?;
        for (i, arg) in extra.enumerate() {
            if i > 0 {
                sink.write_str(", ")?;
            }
            write!(sink, "{arg}")?;
        }
        sink.write_char('}')?;
    }
    Ok(())
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_into(f)
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Description")
            .field(&self.to_string())
            .finish()
    }
}

impl From<&'static str> for Description {
    fn from(text: &'static str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// Build a [`Description`] from a template and arguments.
///
/// Each argument must be `Display + Send + Sync + 'static`; it is moved into
/// the description and rendered only when the description is.
///
/// ```
/// use attest::describe;
///
/// let d = describe!("both [{}] and [{}]", "a", "b");
/// assert_eq!(d.to_string(), "both [a] and [b]");
/// ```
#[macro_export]
macro_rules! describe {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Description::new(
            $template,
            ::std::vec![$($crate::description::arg($arg)),*],
        )
    };
}
