//! Terminal output escaping
//!
//! # Security: Terminal Injection Prevention
//!
//! Record text is logged user speech and assistant output served by a remote store.
//! Anything that reaches the screen, whether in the TUI or in CLI output, must go through
//! [`escape_text`] first. Escape sequences embedded in that text could otherwise:
//! - Clear the screen or move the cursor
//! - Change terminal colors or set the window title
//! - Reorder the visible text with bidirectional overrides

/// Removes everything from `text` that a terminal would interpret instead of print.
///
/// - CSI sequences (`ESC [ ... final`, and the 8-bit `\u{9b}` form)
/// - OSC sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// - Any other two-byte `ESC x` sequence
/// - Control characters other than `\n` and `\t`
/// - Unicode bidirectional embedding, override and isolate characters
///
/// # Examples
///
/// ```
/// use assistant_console::utils::terminal::escape_text;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(escape_text(text), "Red text");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.next() {
                Some('[') => skip_csi(&mut chars),
                Some(']') => skip_osc(&mut chars),
                // ESC x: two-byte sequence, already consumed
                _ => {}
            },
            '\u{9b}' => skip_csi(&mut chars),
            '\n' | '\t' => result.push(ch),
            c if c.is_control() || is_bidi_control(c) => {}
            c => result.push(c),
        }
    }

    result
}

/// [`escape_text`] for one-line contexts: line breaks and tabs become spaces
pub fn escape_single_line(text: &str) -> String {
    escape_text(text).replace(['\n', '\t'], " ")
}

// Parameter and intermediate bytes run until a final byte in 0x40..=0x7E
fn skip_csi(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    for c in chars.by_ref() {
        if ('\x40'..='\x7e').contains(&c) {
            break;
        }
    }
}

// Terminated by BEL or ST (ESC \)
fn skip_osc(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(c) = chars.next() {
        match c {
            '\x07' => break,
            '\x1b' => {
                if chars.peek() == Some(&'\\') {
                    chars.next();
                }
                break;
            }
            _ => {}
        }
    }
}

fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}')
}
