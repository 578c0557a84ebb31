//! Terminal output sanitization
//!
//! Backend summaries and extracted source titles are remote, untrusted text.
//! Before anything reaches the terminal (TUI widgets or CLI stdout) it goes
//! through [`strip_ansi_codes`], so a hostile reply cannot clear the screen,
//! move the cursor, retitle the window or smuggle hyperlinks via OSC 8.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips ANSI escape sequences and stray control characters
///
/// Handles CSI (`ESC [ ... letter`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and two-character escapes. Tab, newline and carriage return are kept.
///
/// # Examples
///
/// ```
/// use tech_researcher::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // CSI ends at the first letter
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    // OSC ends at BEL or ST (ESC \)
                    while let Some(next_ch) = chars.next() {
                        if next_ch == BEL {
                            break;
                        }
                        if next_ch == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}
