//! `Reflect` — The runtime type facility matchers inspect values through
//!
//! Matchers accept dynamically typed subjects. `Reflect` is the small amount
//! of introspection they need: downcasting, a coarse [`Kind`] tag, nil
//! detection, and access to strings, numbers, lengths and container
//! elements.
//!
//! # Extending
//!
//! Implement `Reflect` for your own types. Only [`Reflect::as_any`] is
//! required; everything else defaults to "a struct with no inspectable
//! shape".
//!
//! ```
//! use std::any::Any;
//! use attest::{Kind, Reflect, Value};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! impl Reflect for Point {
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! let value = Value::new(Point { x: 1, y: 2 });
//! assert_eq!(value.kind(), Kind::Struct);
//! assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
//! ```

use crate::Value;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Coarse classification of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The untyped absent value ([`Nil`]).
    Nil,
    /// `()`.
    Unit,
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// Floating point numbers.
    Float,
    /// `char`.
    Char,
    /// Owned or borrowed strings.
    String,
    /// Ordered sequences (`Vec`, `VecDeque`, arrays).
    List,
    /// Sets.
    Set,
    /// Key-value maps.
    Map,
    /// `Option<T>` — `None` is the typed absent value.
    Option,
    /// Owning or shared pointers (`Box`, `Arc`).
    Pointer,
    /// Tuples.
    Tuple,
    /// Anything else.
    Struct,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Option => "option",
            Self::Pointer => "pointer",
            Self::Tuple => "tuple",
            Self::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// Runtime introspection for values handed to matchers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so that matchers and their results
/// can be shared across parallel test workers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Reflect`",
    label = "this type cannot be matched against",
    note = "implement `Reflect` for your type; only `fn as_any(&self) -> &dyn Any {{ self }}` is required"
)]
#[allow(clippy::len_without_is_empty)]
pub trait Reflect: Any + fmt::Debug + Send + Sync {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The concrete type name, used in type-mismatch explanations.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The coarse kind of this value.
    fn kind(&self) -> Kind {
        Kind::Struct
    }

    /// Returns `true` for absent values, typed or untyped.
    fn is_nil(&self) -> bool {
        false
    }

    /// String view, for string-shaped values.
    fn as_str(&self) -> Option<&str> {
        None
    }

    /// Numeric view, for numbers.
    fn as_f64(&self) -> Option<f64> {
        None
    }

    /// Length, for strings (in bytes) and containers.
    fn len(&self) -> Option<usize> {
        None
    }

    /// The elements of a container (map values for maps).
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }

    /// The keys of a map.
    fn keys(&self) -> Option<Vec<Value>> {
        None
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Nil
// ═══════════════════════════════════════════════════════════════════════════════

/// The untyped absent value.
///
/// `Option::None` of any type is the *typed* absent value; both are
/// recognised by [`Reflect::is_nil`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

impl fmt::Debug for Nil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("nil")
    }
}

impl Reflect for Nil {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Nil
    }

    fn is_nil(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scalars
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! reflect_numbers {
    ($kind:ident => $($t:ty),+) => {
        $(
            impl Reflect for $t {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_lossless,
                    clippy::unnecessary_cast
                )]
                fn as_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )+
    };
}

reflect_numbers!(Int => i8, i16, i32, i64, i128, isize);
reflect_numbers!(Uint => u8, u16, u32, u64, u128, usize);
reflect_numbers!(Float => f32, f64);

impl Reflect for bool {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Bool
    }
}

impl Reflect for char {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Char
    }
}

impl Reflect for () {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Unit
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Strings
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! reflect_strings {
    ($($t:ty),+) => {
        $(
            impl Reflect for $t {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind {
                    Kind::String
                }

                fn as_str(&self) -> Option<&str> {
                    Some(&**self)
                }

                fn len(&self) -> Option<usize> {
                    Some(str::len(&**self))
                }
            }
        )+
    };
}

reflect_strings!(String, &'static str, Box<str>, Arc<str>);

// ═══════════════════════════════════════════════════════════════════════════════
// Containers
// ═══════════════════════════════════════════════════════════════════════════════

fn values<'a, T, I>(items: I) -> Vec<Value>
where
    T: Reflect + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| Value::new(item.clone())).collect()
}

macro_rules! reflect_sequences {
    ($kind:ident => $($t:ident),+) => {
        $(
            impl<T: Reflect + Clone> Reflect for $t<T> {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn len(&self) -> Option<usize> {
                    Some($t::len(self))
                }

                fn elements(&self) -> Option<Vec<Value>> {
                    Some(values(self))
                }
            }
        )+
    };
}

reflect_sequences!(List => Vec, VecDeque);
reflect_sequences!(Set => BTreeSet);

impl<T: Reflect + Clone, const N: usize> Reflect for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::List
    }

    fn len(&self) -> Option<usize> {
        Some(N)
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(values(self))
    }
}

impl<T: Reflect + Clone> Reflect for HashSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Set
    }

    fn len(&self) -> Option<usize> {
        Some(HashSet::len(self))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(values(self))
    }
}

impl<K: Reflect + Clone, V: Reflect + Clone> Reflect for HashMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn len(&self) -> Option<usize> {
        Some(HashMap::len(self))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(values(self.values()))
    }

    fn keys(&self) -> Option<Vec<Value>> {
        Some(values(HashMap::keys(self)))
    }
}

impl<K: Reflect + Clone, V: Reflect + Clone> Reflect for BTreeMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn len(&self) -> Option<usize> {
        Some(BTreeMap::len(self))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(values(self.values()))
    }

    fn keys(&self) -> Option<Vec<Value>> {
        Some(values(BTreeMap::keys(self)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Options and pointers
// ═══════════════════════════════════════════════════════════════════════════════

impl<T: Reflect> Reflect for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Option
    }

    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Pointer
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Pointer
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tuples
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! reflect_tuples {
    ($(($($name:ident),+) => $len:expr;)+) => {
        $(
            impl<$($name: Reflect + Clone),+> Reflect for ($($name,)+) {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind {
                    Kind::Tuple
                }

                fn len(&self) -> Option<usize> {
                    Some($len)
                }

                #[allow(non_snake_case)]
                fn elements(&self) -> Option<Vec<Value>> {
                    let ($($name,)+) = self;
                    Some(vec![$(Value::new($name.clone())),+])
                }
            }
        )+
    };
}

reflect_tuples! {
    (A) => 1;
    (A, B) => 2;
    (A, B, C) => 3;
    (A, B, C, D) => 4;
}
