//! Brace-directive style compiler for terminal output.
//!
//! This crate turns templates such as `{bold}{fg 208}warning{reset}` into
//! text with ANSI SGR escape sequences. While a [`Style`] executes it keeps a
//! running [`State`] (foreground, background, bold, reverse) so that later
//! directives and extension functions can see, and build on, the style that is
//! currently active.
//!
//! # Example
//!
//! ```rust
//! use huelog_style::render;
//!
//! let output = render("{fg 1}error{reset} done").unwrap();
//! assert_eq!(output, "\x1b[38;5;1merror\x1b[0m done");
//! ```
//!
//! # Directives
//!
//! | directive | effect |
//! |---|---|
//! | `{fg N}`, `{bg N}` | set foreground / background to palette index `N` (0-255) |
//! | `{nofg}`, `{nobg}` | back to the terminal default color |
//! | `{bold}`, `{nobold}` | bold on / off |
//! | `{reverse}`, `{noreverse}` | reverse video on / off |
//! | `{reset}` | clear every attribute |
//! | `{from <text> <bg>}` | draw `text` as a transition out of the current background into `bg` |
//! | `{to <bg> <text>}` | draw `text` as a transition from the current background into `bg` |
//!
//! Arguments are integers, double-quoted strings (`"a\"b"`) or raw
//! back-quoted strings. Any other name must be registered as an extension in
//! [`Functions`]; unknown names are compile errors.
//!
//! # Extension Functions
//!
//! Extensions are how higher layers hook into compilation: the function is
//! handed the running state at its call site, and its return value is spliced
//! into the output as literal text. See [`Functions`].

mod error;
mod functions;
mod state;
mod style;
mod tokenizer;

pub use error::StyleError;
pub use functions::{Arg, Args, CallContext, Extension, Functions};
pub use state::{escape, State};
pub use style::Style;

/// Directive that clears every style attribute.
pub const STYLE_RESET: &str = "{reset}";

/// Compiles and executes `template` from a plain state with styling enabled.
pub fn compile_and_execute(template: &str, functions: &Functions) -> Result<String, StyleError> {
    let mut style = Style::compile(template, functions)?;
    style.execute()
}

/// Compiles and executes a template that uses builtin directives only.
pub fn render(template: &str) -> Result<String, StyleError> {
    compile_and_execute(template, &Functions::new())
}
