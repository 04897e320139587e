use super::token::{Token, TokenKind, operator_kind};

/// Push the pending word (if any) and clear the buffer.
fn flush_word(tokens: &mut Vec<Token>, buf: &mut String) {
    if !buf.is_empty() {
        tokens.push(Token::new(TokenKind::Word, std::mem::take(buf)));
    }
}

/// Split one input line into tokens.
///
/// Never fails. Whitespace separates words and is dropped. `'...'` and
/// `"..."` produce a `Quoted` token with the quotes stripped; no escapes
/// or nested quotes are interpreted, and an unterminated quote runs to the
/// end of the line. Operators are matched longest-first (`&&` before `&`).
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buf = String::new();

    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if c.is_whitespace() {
            flush_word(&mut tokens, &mut buf);
            i += 1;
            continue;
        }

        if c == '\'' || c == '"' {
            flush_word(&mut tokens, &mut buf);
            i += 1; // skip opening quote
            let mut quoted = String::new();
            while i < len && chars[i] != c {
                quoted.push(chars[i]);
                i += 1;
            }
            if i < len {
                i += 1; // skip closing quote
            } else {
                log::debug!("unterminated {c} quote, reading to end of line");
            }
            tokens.push(Token::new(TokenKind::Quoted, quoted));
            continue;
        }

        // Two-char operators
        if i + 1 < len {
            let two: String = chars[i..=i + 1].iter().collect();
            if let Some(kind) = operator_kind(&two) {
                flush_word(&mut tokens, &mut buf);
                tokens.push(Token::new(kind, two));
                i += 2;
                continue;
            }
        }

        // Single-char operators
        let mut one = [0u8; 4];
        let one = c.encode_utf8(&mut one);
        if let Some(kind) = operator_kind(one) {
            flush_word(&mut tokens, &mut buf);
            tokens.push(Token::new(kind, &*one));
            i += 1;
            continue;
        }

        buf.push(c);
        i += 1;
    }

    flush_word(&mut tokens, &mut buf);

    log::trace!("tokenized {input:?} into {} token(s)", tokens.len());
    tokens
}
