//! Command-line lexer for tsh.
//!
//! Splits one input line into an argument vector using the logos lexer
//! generator. The grammar is deliberately small:
//!
//! - Arguments are separated by spaces or tabs.
//! - An argument that *starts* with `'` runs to the next `'` (or to end of
//!   line when unterminated) and may contain whitespace.
//! - A final argument beginning with `&` requests background execution and
//!   is dropped from the argument vector.
//!
//! There are no pipes, redirections, variables or globs.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    /// `'...'` with the quotes stripped. The closing quote is optional.
    #[regex(r"'[^']*'?", |lex| unquote(lex.slice()))]
    Quoted(String),

    /// Any run of non-blank characters not starting with a quote.
    #[regex(r"[^ \t\r\n'][^ \t\r\n]*", |lex| lex.slice().to_string())]
    Word(String),
}

fn unquote(raw: &str) -> String {
    let inner = &raw[1..];
    inner.strip_suffix('\'').unwrap_or(inner).to_string()
}

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    /// Program name followed by its arguments. Empty for a blank line.
    pub argv: Vec<String>,
    /// True when the line ended with an `&` argument.
    pub background: bool,
}

impl CommandLine {
    /// The command name, if the line was not blank.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Tokenize a raw input line.
pub fn tokenize(line: &str) -> CommandLine {
    let mut argv = Vec::new();
    for token in Token::lexer(line) {
        match token {
            Ok(Token::Quoted(s)) | Ok(Token::Word(s)) => argv.push(s),
            // Every non-blank character starts one of the two patterns.
            Err(()) => tracing::warn!(line, "lexer rejected input"),
        }
    }

    let background = argv.last().is_some_and(|last| last.starts_with('&'));
    if background {
        argv.pop();
    }

    CommandLine { argv, background }
}
