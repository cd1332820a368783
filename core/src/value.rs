//! `Value` — The shared handle every matcher receives
//!
//! Values are type-erased behind [`Reflect`] and reference counted, so the
//! same value can flow into every sub-matcher of a composition and be kept by
//! every [`MatchResult`](crate::MatchResult) produced along the way without
//! being copied.

use crate::reflect::{Kind, Nil, Reflect};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed value under test.
///
/// Construct one from anything implementing [`Reflect`] (`Value::new`,
/// `.into()`), or use [`Value::nil`] for the untyped absent value.
///
/// # Identity
///
/// Equality is handle identity: two `Value`s are equal when they share one
/// allocation. This is what makes "the result carries the value it was
/// produced from" checkable.
///
/// # Example
///
/// ```
/// use attest::{Kind, Value};
///
/// let value = Value::new(String::from("bar"));
/// assert_eq!(value.kind(), Kind::String);
/// assert_eq!(value.as_str(), Some("bar"));
/// assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("bar"));
/// assert!(value.downcast_ref::<i32>().is_none());
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Reflect>,
}

impl Value {
    /// Wrap a value.
    pub fn new<T: Reflect>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// The untyped absent value.
    #[must_use]
    pub fn nil() -> Self {
        Self::new(Nil)
    }

    /// Wrap an already shared value.
    #[must_use]
    pub fn from_arc(inner: Arc<dyn Reflect>) -> Self {
        Self { inner }
    }

    /// Borrow the value as a [`Reflect`] trait object.
    #[must_use]
    pub fn as_reflect(&self) -> &dyn Reflect {
        &*self.inner
    }

    /// Borrow the value as `&dyn Any`.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        self.inner.as_any()
    }

    /// Downcast to a concrete type. Requires an exact type match.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the value's concrete type is exactly `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// The concrete type name of the wrapped value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// The coarse kind of the wrapped value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind()
    }

    /// Returns `true` for [`Nil`] and for `Option::None` of any type.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.inner.is_nil()
    }

    /// String view, if the value is string-shaped.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.inner.as_str()
    }

    /// Numeric view, if the value is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.inner.as_f64()
    }

    /// Length of a string or container.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        self.inner.len()
    }

    /// Returns `Some(true)` for empty strings and containers.
    #[must_use]
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    /// Container elements (map values for maps).
    #[must_use]
    pub fn elements(&self) -> Option<Vec<Value>> {
        self.inner.elements()
    }

    /// Map keys.
    #[must_use]
    pub fn keys(&self) -> Option<Vec<Value>> {
        self.inner.keys()
    }

    /// Returns `true` if both handles share one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::nil()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl<T: Reflect> From<T> for Value {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}
