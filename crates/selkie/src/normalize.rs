use std::sync::OnceLock;

use regex::Regex;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches Mermaid markdown fences: an opening ```mermaid with its line
    // break, and any bare ``` wherever it occurs.
    RE.get_or_init(|| Regex::new(r"```mermaid\n|```").unwrap())
}

/// Strips markdown fence delimiters and outer whitespace from raw markup.
///
/// Accepts both fenced (```` ```mermaid ... ``` ````) and bare diagram text;
/// CRLF line endings are folded to LF first so the fence-open pattern matches
/// either convention. Idempotent: normalizing already-normalized text is a
/// no-op.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    fence_re().replace_all(&unified, "").trim().to_string()
}
