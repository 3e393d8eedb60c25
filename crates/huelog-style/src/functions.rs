//! Extension functions callable from directives.
//!
//! Besides the builtin style directives, a [`Style`](crate::Style) can call
//! user-supplied functions registered in a [`Functions`] table. A function
//! receives the [`CallContext`] of its call site (the running [`State`] and
//! whether styling is enabled) and its parsed [`Args`]. Whatever it returns is
//! inserted verbatim into the output; it is not parsed again.
//!
//! ```rust
//! use huelog_style::{compile_and_execute, Functions};
//!
//! let functions = Functions::new().register("shout", |_ctx, args| {
//!     args.expect(1)?;
//!     Ok(args.str(0)?.to_uppercase())
//! });
//!
//! let output = compile_and_execute(r#"{shout "hi"} there"#, &functions).unwrap();
//! assert_eq!(output, "HI there");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::state::State;

/// A directive argument literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Int(i64),
}

impl Arg {
    fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) => "integer",
        }
    }
}

/// Typed access to the arguments of one directive call.
///
/// Accessors return `Err(String)` describing the mismatch; the executing
/// style wraps it into [`StyleError::Execute`](crate::StyleError::Execute).
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Arg],
}

impl<'a> Args<'a> {
    pub(crate) fn new(values: &'a [Arg]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails unless exactly `count` arguments were given.
    pub fn expect(&self, count: usize) -> Result<(), String> {
        if self.values.len() == count {
            Ok(())
        } else {
            Err(format!(
                "expected {} argument{}, got {}",
                count,
                if count == 1 { "" } else { "s" },
                self.values.len()
            ))
        }
    }

    pub fn get(&self, index: usize) -> Option<&'a Arg> {
        self.values.get(index)
    }

    /// Returns argument `index` as a string.
    pub fn str(&self, index: usize) -> Result<&'a str, String> {
        match self.values.get(index) {
            Some(Arg::Str(value)) => Ok(value),
            Some(other) => Err(format!(
                "argument {} must be a string, got {}",
                index + 1,
                other.kind()
            )),
            None => Err(format!("missing argument {}", index + 1)),
        }
    }

    /// Returns argument `index` as an integer.
    pub fn int(&self, index: usize) -> Result<i64, String> {
        match self.values.get(index) {
            Some(Arg::Int(value)) => Ok(*value),
            Some(other) => Err(format!(
                "argument {} must be an integer, got {}",
                index + 1,
                other.kind()
            )),
            None => Err(format!("missing argument {}", index + 1)),
        }
    }

    /// Returns argument `index` as a 256-color palette index.
    pub fn color(&self, index: usize) -> Result<u8, String> {
        let value = self.int(index)?;
        u8::try_from(value).map_err(|_| format!("color {} out of range (0-255)", value))
    }
}

/// What an extension function can see of its call site.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    state: &'a State,
    styling: bool,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(state: &'a State, styling: bool) -> Self {
        Self { state, styling }
    }

    /// The style accumulated by the directives executed so far.
    pub fn state(&self) -> &'a State {
        self.state
    }

    /// Whether the executing style emits escape sequences.
    pub fn styling(&self) -> bool {
        self.styling
    }
}

/// A function callable from a directive.
///
/// Implemented for every `Fn(&CallContext, &Args) -> Result<String, String>`
/// closure that is `Send + Sync`.
pub trait Extension: Send + Sync {
    fn call(&self, context: &CallContext<'_>, args: &Args<'_>) -> Result<String, String>;
}

impl<F> Extension for F
where
    F: Fn(&CallContext<'_>, &Args<'_>) -> Result<String, String> + Send + Sync,
{
    fn call(&self, context: &CallContext<'_>, args: &Args<'_>) -> Result<String, String> {
        self(context, args)
    }
}

/// A table of named extension functions.
///
/// Cloning is cheap: functions are shared behind `Arc`. Builtin directive
/// names (`fg`, `bold`, ...) always resolve to the builtin, so registering an
/// extension under one of them has no effect.
#[derive(Clone, Default)]
pub struct Functions {
    table: HashMap<String, Arc<dyn Extension>>,
}

impl Functions {
    /// Creates an empty table: only builtin directives are available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function, returning `self` for chaining.
    pub fn register<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&CallContext<'_>, &Args<'_>) -> Result<String, String> + Send + Sync + 'static,
    {
        self.insert(name, function);
        self
    }

    /// Adds or replaces a function.
    pub fn insert<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&CallContext<'_>, &Args<'_>) -> Result<String, String> + Send + Sync + 'static,
    {
        self.insert_extension(name, function);
    }

    /// Adds or replaces a function given as any [`Extension`] implementor.
    pub fn insert_extension(&mut self, name: impl Into<String>, extension: impl Extension + 'static) {
        self.table.insert(name.into(), Arc::new(extension));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<dyn Extension>> {
        self.table.get(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Functions").field("names", &names).finish()
    }
}
