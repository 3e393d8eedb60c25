//! Extension functions that turn style directives into host fields.
//!
//! Registered on every style compiled by a [`Compiler`](crate::Compiler):
//!
//! - `{lorg "name"}` → `${name}`
//! - `{onlevel "level" "fragment"}` → `${onlevel:level:<sequence>:<previous>}`
//! - `{ontrace "fragment"}` .. `{onfatal "fragment"}` → the same, level fixed
//! - `{store}` → `${store}`
//! - `{restore}` → `${restore}`
//!
//! The fragment of an `onlevel` directive is compiled on its own, with no
//! extensions, and executed from the style state active at the directive.
//! It does not change that state. A fragment that fails to compile or
//! execute is replaced by a visible `#{COMPILE ERROR: ..}` or
//! `#{EXECUTE ERROR: ..}` marker.

use huelog_style::{render, Functions, State, Style};

use crate::host::Level;
use crate::restorer::{OnLevelToken, ON_LEVEL, RESTORE, STORE};

/// Directive name that emits a host field.
pub(crate) const FIELD: &str = "lorg";

#[derive(Debug, Clone, Copy)]
pub(crate) struct Inserter {
    styling: bool,
}

impl Inserter {
    pub(crate) fn new(styling: bool) -> Self {
        Self { styling }
    }

    /// The extension set for one compilation.
    pub(crate) fn functions(self) -> Functions {
        let mut functions = Functions::new()
            .register(FIELD, |_, args| {
                args.expect(1)?;
                Ok(insert_field(args.str(0)?))
            })
            .register(ON_LEVEL, move |ctx, args| {
                args.expect(2)?;
                Ok(self.insert_on_level(ctx.state(), args.str(0)?, args.str(1)?))
            })
            .register(STORE, |_, args| {
                args.expect(0)?;
                Ok(insert_field(STORE))
            })
            .register(RESTORE, |_, args| {
                args.expect(0)?;
                Ok(insert_field(RESTORE))
            });

        for level in Level::ALL {
            functions.insert(format!("on{}", level.as_str()), move |ctx, args| {
                args.expect(1)?;
                Ok(self.insert_on_level(ctx.state(), level.as_str(), args.str(0)?))
            });
        }

        functions
    }

    fn insert_on_level(self, outer: &State, level: &str, fragment: &str) -> String {
        let mut style = match Style::compile(fragment, &Functions::new()) {
            Ok(style) => style.with_styling(self.styling),
            Err(err) => {
                log::warn!("{} fragment {:?} does not compile: {}", level, fragment, err);
                return format!("#{{COMPILE ERROR: {}}}", err);
            }
        };

        let previous = if self.styling {
            // A state always renders to valid builtin directives.
            render(&outer.to_string()).unwrap_or_default()
        } else {
            String::new()
        };

        style.set_state(*outer);
        let sequence = match style.execute() {
            Ok(sequence) => sequence,
            Err(err) => {
                log::warn!("{} fragment {:?} does not execute: {}", level, fragment, err);
                return format!("#{{EXECUTE ERROR: {}}}", err);
            }
        };

        let token = OnLevelToken {
            level: level.to_lowercase(),
            sequence,
            previous,
        };
        insert_field(&format!("{}{}{}", ON_LEVEL, OnLevelToken::DELIMITER, token.pack()))
    }
}

fn insert_field(name: &str) -> String {
    format!("${{{}}}", name)
}
