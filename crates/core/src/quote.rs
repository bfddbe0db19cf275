//! Argument Encoder for Kakoune command lines.
//!
//! Every argument written back to Kakoune is wrapped in double quotes. Inside
//! a quoted word Kakoune only treats the delimiter itself specially, and a
//! literal delimiter is written by doubling it. Newlines, backslashes and
//! every other character pass through untouched: escaping them the way a
//! shell or a Rust debug string would makes Kakoune see the escape sequence
//! literally.
//!
//! [`tokenize`] is the inverse for a single command line. It understands
//! bare words and `"..."`/`'...'` quoted words, which is all the encoder
//! ever produces.

use crate::error::{Error, Result};

/// Escape every occurrence of `ch` in `value` by doubling it.
///
/// Nothing else is touched.
pub fn escape_char(value: &str, ch: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == ch {
            out.push(c);
        }
        out.push(c);
    }
    out
}

/// Encode `value` as exactly one double-quoted Kakoune word.
///
/// ```
/// use kakbridge_core::quote;
///
/// assert_eq!(quote("hello"), "\"hello\"");
/// assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
/// assert_eq!(quote(""), "\"\"");
/// ```
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    out.push_str(&escape_char(value, '"'));
    out.push('"');
    out
}

/// Split one Kakoune command line into its words.
///
/// Quoted words may span newlines. Outside quotes, any whitespace separates
/// words.
///
/// # Errors
///
/// Returns [`Error::UnterminatedQuote`] if a quoted word is never closed.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut word = String::new();
        if c == '"' || c == '\'' {
            chars.next();
            let mut closed = false;
            while let Some((_, inner)) = chars.next() {
                if inner == c {
                    // A doubled delimiter is a literal delimiter
                    if matches!(chars.peek(), Some(&(_, next)) if next == c) {
                        chars.next();
                        word.push(c);
                        continue;
                    }
                    closed = true;
                    break;
                }
                word.push(inner);
            }
            if !closed {
                return Err(Error::UnterminatedQuote {
                    delimiter: c,
                    position: start,
                });
            }
        } else {
            while let Some(&(_, inner)) = chars.peek() {
                if inner.is_whitespace() {
                    break;
                }
                word.push(inner);
                chars.next();
            }
        }
        words.push(word);
    }

    Ok(words)
}
