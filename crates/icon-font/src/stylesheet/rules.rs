//! Minimal CSS rule scanner.
//!
//! Only splits a stylesheet into `selector { body }` pairs and bodies into
//! declarations; values are never interpreted here.

use std::borrow::Cow;

/// Style rule with a raw selector list and a raw declaration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StyleRule<'a> {
    pub(crate) selector: &'a str,
    pub(crate) body: &'a str,
}

/// Removes `/* ... */` comments, leaving quoted strings intact.
pub(crate) fn strip_comments(css: &str) -> Cow<'_, str> {
    if !css.contains("/*") {
        return Cow::Borrowed(css);
    }

    let mut output = String::with_capacity(css.len());
    let mut rest = css;
    while !rest.is_empty() {
        let Some(pos) = find_unquoted(rest, |ch, tail| ch == '/' && tail.starts_with("/*")) else {
            output.push_str(rest);
            break;
        };
        output.push_str(&rest[..pos]);
        rest = match rest[pos + 2..].find("*/") {
            Some(end) => &rest[pos + 2 + end + 2..],
            None => "", // unterminated comment swallows the remainder
        };
        // Comments separate tokens.
        output.push(' ');
    }
    Cow::Owned(output)
}

/// Finds the first position outside quoted strings where `pred` holds.
/// `pred` receives the char and the tail of the input starting at it.
fn find_unquoted(input: &str, mut pred: impl FnMut(char, &str) -> bool) -> Option<usize> {
    let mut quote = None;
    let mut escaped = false;
    for (pos, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (_, '\\') => escaped = true,
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => { /* inside a string */ }
            (None, '"' | '\'') => quote = Some(ch),
            (None, _) if pred(ch, &input[pos..]) => return Some(pos),
            (None, _) => { /* regular char */ }
        }
    }
    None
}

/// Returns the position of the `}` closing a block whose `{` is at `open`.
fn closing_brace(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let body_start = open + 1;
    let pos = find_unquoted(&input[body_start..], |ch, _| match ch {
        '{' => {
            depth += 1;
            false
        }
        '}' if depth == 0 => true,
        '}' => {
            depth -= 1;
            false
        }
        _ => false,
    })?;
    Some(body_start + pos)
}

/// Iterator over top-level style rules; at-rules are skipped together with their blocks.
#[derive(Debug, Clone)]
pub(crate) struct Rules<'a> {
    rest: &'a str,
}

impl<'a> Rules<'a> {
    pub(crate) fn new(css: &'a str) -> Self {
        Self { rest: css }
    }
}

impl<'a> Iterator for Rules<'a> {
    type Item = StyleRule<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let input = self.rest.trim_start();
            let pos = find_unquoted(input, |ch, _| matches!(ch, '{' | ';' | '}'))?;
            if input[pos..].starts_with('{') {
                let prelude = input[..pos].trim();
                let (body, rest) = match closing_brace(input, pos) {
                    Some(end) => (&input[pos + 1..end], &input[end + 1..]),
                    None => (&input[pos + 1..], ""),
                };
                self.rest = rest;
                if prelude.starts_with('@') {
                    log::trace!("skipping at-rule `{prelude}`");
                    continue;
                }
                return Some(StyleRule {
                    selector: prelude,
                    body,
                });
            }
            // At-rule statements (`@import ...;`) and stray closing braces.
            self.rest = &input[pos + 1..];
        }
    }
}

/// Iterates over `(name, value)` declarations in a rule body. Names are lowercased;
/// a trailing `!important` is dropped from values.
pub(crate) fn declarations(body: &str) -> impl Iterator<Item = (String, &str)> + '_ {
    let mut rest = Some(body);
    std::iter::from_fn(move || loop {
        let input = rest?;
        let declaration = match find_unquoted(input, |ch, _| ch == ';') {
            Some(pos) => {
                rest = Some(&input[pos + 1..]);
                &input[..pos]
            }
            None => {
                rest = None;
                input
            }
        };
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map_or(value, str::trim_end);
        return Some((name.trim().to_ascii_lowercase(), value));
    })
}
