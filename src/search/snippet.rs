//! Snippet extraction around a match.

const ELLIPSIS: &str = "...";

/// Extract a window of `context_length` characters on each side of
/// `match_position`.
///
/// Positions are character offsets. An ellipsis marks each side where the
/// window stops short of the text boundary. Empty text or an empty window
/// yields an empty snippet.
pub fn generate_snippet(content: &str, match_position: usize, context_length: usize) -> String {
    let len = content.chars().count();
    let start = match_position.saturating_sub(context_length);
    let end = match_position.saturating_add(context_length).min(len);

    if len == 0 || start >= end {
        return String::new();
    }

    let window: String = content.chars().skip(start).take(end - start).collect();

    let mut snippet = String::with_capacity(window.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&window);
    if end < len {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
