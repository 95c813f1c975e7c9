//! Label wrapping
//!
//! Labels are split greedily at break characters once a line reaches the
//! character budget. Tokens are never split, so a line without a break
//! character in reach may run past the budget.

/// Characters a line may end on
const BREAK_CHARS: &[char] = &[' ', '\t', ',', ';', '，', '。', '、', '；'];

fn is_break_char(c: char) -> bool {
    BREAK_CHARS.contains(&c)
}

/// Split `label` into lines of roughly `max_chars` characters.
///
/// The break character that ends a line stays at the end of that line, so
/// concatenating the result reproduces `label`.
pub fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    if label.chars().count() <= max_chars {
        return vec![label.to_string()];
    }

    let mut lines = vec![];
    let mut current = String::new();
    let mut current_len = 0;

    for c in label.chars() {
        current.push(c);
        current_len += 1;
        if current_len > max_chars && is_break_char(c) {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
