//! Tokenizer for `{name arg...}` directives embedded in plain text.
//!
//! Plain text runs are borrowed from the input. A directive opens with `{`,
//! names a function, takes zero or more arguments and closes with `}`.
//! Arguments are double-quoted strings (with backslash escapes), raw
//! back-quoted strings or integers. A `}` inside a quoted argument does not
//! close the directive, so fragments like `{onerror "{bg 1}"}` nest.
//!
//! A `}` outside any directive is ordinary text.

use crate::error::StyleError;
use crate::functions::Arg;

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Plain text content.
    Text(&'a str),
    /// A directive call: `{name args...}`.
    Directive(Directive<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    pub name: &'a str,
    pub args: Vec<Arg>,
    /// Byte offset of the opening brace.
    pub offset: usize,
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Checks if a string is a valid function name.
    ///
    /// Names start with an ASCII letter or underscore and continue with
    /// letters, digits or underscores.
    pub fn is_valid_name(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn directive(&mut self) -> Result<Directive<'a>, StyleError> {
        let offset = self.pos;
        self.bump(); // '{'
        self.skip_whitespace();

        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        let name = &self.input[start..self.pos];
        if name.is_empty() {
            return Err(match self.peek() {
                Some('}') => StyleError::compile(offset, "missing function name"),
                Some(c) => StyleError::compile(
                    self.pos,
                    format!("unexpected character {:?} in directive", c),
                ),
                None => StyleError::compile(offset, "unclosed directive"),
            });
        }
        if !Self::is_valid_name(name) {
            return Err(StyleError::compile(
                start,
                format!("invalid function name {:?}", name),
            ));
        }

        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Directive { name, args, offset });
                }
                Some('"') => args.push(Arg::Str(self.quoted()?)),
                Some('`') => args.push(Arg::Str(self.raw()?)),
                Some(c) if c == '-' || c.is_ascii_digit() => args.push(Arg::Int(self.integer()?)),
                Some(c) => {
                    return Err(StyleError::compile(
                        self.pos,
                        format!("unexpected character {:?} in directive", c),
                    ))
                }
                None => return Err(StyleError::compile(offset, "unclosed directive")),
            }
        }
    }

    fn quoted(&mut self) -> Result<String, StyleError> {
        let start = self.pos;
        self.bump(); // '"'
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => {
                        return Err(StyleError::compile(
                            self.pos - other.len_utf8() - 1,
                            format!("unknown escape \\{}", other),
                        ))
                    }
                    None => return Err(StyleError::compile(start, "unterminated string")),
                },
                Some(c) => value.push(c),
                None => return Err(StyleError::compile(start, "unterminated string")),
            }
        }
    }

    fn raw(&mut self) -> Result<String, StyleError> {
        let start = self.pos;
        self.bump(); // '`'
        let rest = &self.input[self.pos..];
        match rest.find('`') {
            Some(end) => {
                let value = rest[..end].to_string();
                self.pos += end + 1;
                Ok(value)
            }
            None => Err(StyleError::compile(start, "unterminated raw string")),
        }
    }

    fn integer(&mut self) -> Result<i64, StyleError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let literal = &self.input[start..self.pos];
        literal
            .parse()
            .map_err(|_| StyleError::compile(start, format!("invalid number {:?}", literal)))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, StyleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        match remaining.find('{') {
            Some(0) => {
                let result = self.directive().map(Token::Directive);
                if result.is_err() {
                    // Stop after the first error.
                    self.pos = self.input.len();
                }
                Some(result)
            }
            Some(brace) => {
                self.pos += brace;
                Some(Ok(Token::Text(&remaining[..brace])))
            }
            None => {
                self.pos = self.input.len();
                Some(Ok(Token::Text(remaining)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn directive(name: &str, args: Vec<Arg>, offset: usize) -> Token<'_> {
        Token::Directive(Directive { name, args, offset })
    }

    mod tokenize {
        use super::*;

        #[test]
        fn plain_text() {
            assert_eq!(tokens("hello world"), vec![Token::Text("hello world")]);
        }

        #[test]
        fn empty_input() {
            assert!(tokens("").is_empty());
        }

        #[test]
        fn bare_directive() {
            assert_eq!(tokens("{bold}"), vec![directive("bold", vec![], 0)]);
        }

        #[test]
        fn directive_with_integer() {
            assert_eq!(
                tokens("a{fg 1}b"),
                vec![
                    Token::Text("a"),
                    directive("fg", vec![Arg::Int(1)], 1),
                    Token::Text("b"),
                ]
            );
        }

        #[test]
        fn quoted_argument_keeps_braces() {
            assert_eq!(
                tokens(r#"{onerror "{bg 1}"}x"#),
                vec![
                    directive("onerror", vec![Arg::Str("{bg 1}".into())], 0),
                    Token::Text("x"),
                ]
            );
        }

        #[test]
        fn mixed_arguments() {
            assert_eq!(
                tokens(r#"{from ">" 4}"#),
                vec![directive(
                    "from",
                    vec![Arg::Str(">".into()), Arg::Int(4)],
                    0
                )]
            );
        }

        #[test]
        fn raw_string() {
            assert_eq!(
                tokens(r#"{lorg `a "b"`}"#),
                vec![directive("lorg", vec![Arg::Str(r#"a "b""#.into())], 0)]
            );
        }

        #[test]
        fn escapes_in_quoted_string() {
            assert_eq!(
                tokens(r#"{x "a\"b\\c\n"}"#),
                vec![directive("x", vec![Arg::Str("a\"b\\c\n".into())], 0)]
            );
        }

        #[test]
        fn whitespace_inside_directive() {
            assert_eq!(
                tokens("{  fg   12  }"),
                vec![directive("fg", vec![Arg::Int(12)], 0)]
            );
        }

        #[test]
        fn stray_close_brace_is_text() {
            assert_eq!(tokens("a}b"), vec![Token::Text("a}b")]);
        }
    }

    mod errors {
        use super::*;

        fn first_error(input: &str) -> StyleError {
            Tokenizer::new(input)
                .find_map(Result::err)
                .expect("expected an error")
        }

        #[test]
        fn unclosed_directive() {
            let err = first_error("abc {fg 1");
            assert_eq!(err, StyleError::compile(4, "unclosed directive"));
        }

        #[test]
        fn missing_name() {
            assert_eq!(first_error("{}"), StyleError::compile(0, "missing function name"));
        }

        #[test]
        fn unterminated_string() {
            assert!(first_error(r#"{onerror "{bg 1}}"#)
                .to_string()
                .contains("unterminated string"));
        }

        #[test]
        fn bare_word_argument() {
            assert!(first_error("{fg red}")
                .to_string()
                .contains("unexpected character"));
        }

        #[test]
        fn invalid_name() {
            assert!(first_error("{1fg}").to_string().contains("invalid function name"));
        }

        #[test]
        fn tokenizer_stops_after_error() {
            let results: Vec<_> = Tokenizer::new("{fg x} tail").collect();
            assert_eq!(results.len(), 1);
            assert!(results[0].is_err());
        }
    }

    mod names {
        use super::*;

        #[test]
        fn valid_names() {
            assert!(Tokenizer::is_valid_name("fg"));
            assert!(Tokenizer::is_valid_name("on_level"));
            assert!(Tokenizer::is_valid_name("_x1"));
            assert!(Tokenizer::is_valid_name("onError"));
        }

        #[test]
        fn invalid_names() {
            assert!(!Tokenizer::is_valid_name(""));
            assert!(!Tokenizer::is_valid_name("1fg"));
            assert!(!Tokenizer::is_valid_name("fg-1"));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"%$]{0,50}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn text_without_braces_is_one_token(content in plain_text()) {
            let tokens: Vec<_> = Tokenizer::new(&content).collect::<Result<_, _>>().unwrap();
            if content.is_empty() {
                prop_assert!(tokens.is_empty());
            } else {
                prop_assert_eq!(tokens, vec![Token::Text(&content)]);
            }
        }

        #[test]
        fn any_quoted_text_survives(content in "[a-zA-Z0-9 {}:;]{0,30}") {
            let input = format!("{{lorg \"{}\"}}", content);
            let tokens: Vec<_> = Tokenizer::new(&input).collect::<Result<_, _>>().unwrap();
            prop_assert_eq!(
                tokens,
                vec![Token::Directive(Directive { name: "lorg", args: vec![Arg::Str(content)], offset: 0 })]
            );
        }

        #[test]
        fn integers_parse(n in -1000i64..1000) {
            let input = format!("{{fg {}}}", n);
            let tokens: Vec<_> = Tokenizer::new(&input).collect::<Result<_, _>>().unwrap();
            prop_assert_eq!(
                tokens,
                vec![Token::Directive(Directive { name: "fg", args: vec![Arg::Int(n)], offset: 0 })]
            );
        }
    }
}
