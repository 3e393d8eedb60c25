//! Compiled style programs.

use crate::error::StyleError;
use crate::functions::{Arg, Args, CallContext, Functions};
use crate::state::{escape, State};
use crate::tokenizer::{Token, Tokenizer};

/// The builtin style directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Fg,
    Bg,
    NoFg,
    NoBg,
    Bold,
    NoBold,
    Reverse,
    NoReverse,
    Reset,
    From,
    To,
}

impl Builtin {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "fg" => Builtin::Fg,
            "bg" => Builtin::Bg,
            "nofg" => Builtin::NoFg,
            "nobg" => Builtin::NoBg,
            "bold" => Builtin::Bold,
            "nobold" => Builtin::NoBold,
            "reverse" => Builtin::Reverse,
            "noreverse" => Builtin::NoReverse,
            "reset" => Builtin::Reset,
            "from" => Builtin::From,
            "to" => Builtin::To,
            _ => return None,
        })
    }

    /// Applies the directive to `state`, returning the emitted text.
    fn apply(self, state: &mut State, styling: bool, args: &Args<'_>) -> Result<String, String> {
        let mut out = String::new();
        let emit = |out: &mut String, code: &str| {
            if styling {
                out.push_str(code);
            }
        };

        match self {
            Builtin::Fg => {
                args.expect(1)?;
                let color = args.color(0)?;
                state.foreground = Some(color);
                emit(&mut out, &escape::foreground(Some(color)));
            }
            Builtin::Bg => {
                args.expect(1)?;
                let color = args.color(0)?;
                state.background = Some(color);
                emit(&mut out, &escape::background(Some(color)));
            }
            Builtin::NoFg => {
                args.expect(0)?;
                state.foreground = None;
                emit(&mut out, escape::DEFAULT_FOREGROUND);
            }
            Builtin::NoBg => {
                args.expect(0)?;
                state.background = None;
                emit(&mut out, escape::DEFAULT_BACKGROUND);
            }
            Builtin::Bold => {
                args.expect(0)?;
                state.bold = true;
                emit(&mut out, escape::BOLD);
            }
            Builtin::NoBold => {
                args.expect(0)?;
                state.bold = false;
                emit(&mut out, escape::NO_BOLD);
            }
            Builtin::Reverse => {
                args.expect(0)?;
                state.reverse = true;
                emit(&mut out, escape::REVERSE);
            }
            Builtin::NoReverse => {
                args.expect(0)?;
                state.reverse = false;
                emit(&mut out, escape::NO_REVERSE);
            }
            Builtin::Reset => {
                args.expect(0)?;
                *state = State::default();
                emit(&mut out, escape::RESET);
            }
            Builtin::From => {
                // Text drawn in the old background color on the new background.
                args.expect(2)?;
                let text = args.str(0)?;
                let next = args.color(1)?;
                emit(&mut out, &escape::foreground(state.background));
                emit(&mut out, &escape::background(Some(next)));
                out.push_str(text);
                emit(&mut out, &escape::foreground(state.foreground));
                state.background = Some(next);
            }
            Builtin::To => {
                // Text drawn in the new background color on the old background.
                args.expect(2)?;
                let next = args.color(0)?;
                let text = args.str(1)?;
                emit(&mut out, &escape::foreground(Some(next)));
                out.push_str(text);
                emit(&mut out, &escape::background(Some(next)));
                emit(&mut out, &escape::foreground(state.foreground));
                state.background = Some(next);
            }
        }

        Ok(out)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Text(String),
    Builtin { builtin: Builtin, name: String, args: Vec<Arg> },
    Extension { name: String, args: Vec<Arg> },
}

/// A compiled style program.
///
/// Compilation parses the template and resolves every directive name against
/// the builtins and the supplied [`Functions`]. Execution walks the program
/// from the current [`State`], emitting text and escape sequences and
/// updating the state as it goes. Executing twice continues from wherever the
/// first run left the state; use [`set_state`](Self::set_state) to start
/// from a known point.
///
/// # Example
///
/// ```rust
/// use huelog_style::{Functions, State, Style};
///
/// let mut style = Style::compile("{bold}{fg 2}ok", &Functions::new()).unwrap();
/// let output = style.execute().unwrap();
///
/// assert_eq!(output, "\x1b[1m\x1b[38;5;2mok");
/// assert_eq!(style.state(), State { foreground: Some(2), bold: true, ..State::default() });
/// ```
#[derive(Debug, Clone)]
pub struct Style {
    nodes: Vec<Node>,
    functions: Functions,
    state: State,
    styling: bool,
}

impl Style {
    /// Parses `template`, resolving directive names.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Compile`] for malformed directives or names that
    /// are neither builtin nor registered in `functions`.
    pub fn compile(template: &str, functions: &Functions) -> Result<Self, StyleError> {
        let mut nodes = Vec::new();

        for token in Tokenizer::new(template) {
            match token? {
                Token::Text(text) => nodes.push(Node::Text(text.to_string())),
                Token::Directive(directive) => {
                    let name = directive.name.to_string();
                    if let Some(builtin) = Builtin::from_name(directive.name) {
                        nodes.push(Node::Builtin {
                            builtin,
                            name,
                            args: directive.args,
                        });
                    } else if functions.contains(directive.name) {
                        nodes.push(Node::Extension {
                            name,
                            args: directive.args,
                        });
                    } else {
                        return Err(StyleError::compile(
                            directive.offset,
                            format!("function {:?} not defined", directive.name),
                        ));
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            functions: functions.clone(),
            state: State::default(),
            styling: true,
        })
    }

    /// Returns the current running state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Replaces the running state; the next execution starts from it.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    pub fn styling(&self) -> bool {
        self.styling
    }

    /// Enables or disables escape sequence output.
    ///
    /// With styling disabled, directives still update the state and
    /// extension functions still run, but no escape codes are emitted.
    pub fn set_styling(&mut self, enabled: bool) {
        self.styling = enabled;
    }

    /// Builder form of [`set_styling`](Self::set_styling).
    pub fn with_styling(mut self, enabled: bool) -> Self {
        self.styling = enabled;
        self
    }

    /// Runs the program and returns its output.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Execute`] when a directive gets the wrong
    /// arguments or an extension function fails.
    pub fn execute(&mut self) -> Result<String, StyleError> {
        let Style {
            nodes,
            functions,
            state,
            styling,
        } = self;

        let mut output = String::new();
        for node in nodes.iter() {
            let emitted = match node {
                Node::Text(text) => {
                    output.push_str(text);
                    continue;
                }
                Node::Builtin {
                    builtin,
                    name,
                    args,
                } => builtin
                    .apply(state, *styling, &Args::new(args))
                    .map_err(|message| execute_error(name, message))?,
                Node::Extension { name, args } => {
                    let function = functions
                        .get(name)
                        .ok_or_else(|| execute_error(name, "function not defined".to_string()))?;
                    function
                        .call(&CallContext::new(state, *styling), &Args::new(args))
                        .map_err(|message| execute_error(name, message))?
                }
            };
            output.push_str(&emitted);
        }

        Ok(output)
    }
}

fn execute_error(name: &str, message: String) -> StyleError {
    StyleError::Execute {
        directive: name.to_string(),
        message,
    }
}
