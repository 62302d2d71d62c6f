//! HTML to plain-text conversion for indexed page bodies.

use regex::Regex;
use std::sync::LazyLock;

/// `<script>` and `<style>` elements, content included.
static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style regex must compile")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex must compile"));

/// Opening or closing tags of block-level elements.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:div|p|h[1-6]|li|pre|code|blockquote)\b[^>]*>")
        .expect("block tag regex must compile")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex must compile"));

/// Convert rendered HTML into searchable plain text.
///
/// Script and style blocks are dropped with their content, block-level
/// boundaries become spaces so adjacent words stay separate, remaining tags
/// are stripped, entities decoded and whitespace collapsed.
pub fn strip_markup(html: &str) -> String {
    let text = SCRIPT_STYLE.replace_all(html, "");
    let text = COMMENT.replace_all(&text, "");
    let text = BLOCK_TAG.replace_all(&text, " $0 ");
    let text = ANY_TAG.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
