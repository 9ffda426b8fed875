//! Minimal host document for in-browser validation.
//!
//! The generated page does nothing except hand the markup to the rendering
//! library with `startOnLoad: true`. When the library rejects the markup it
//! replaces the diagram element with its bomb-icon error block, whose text
//! contains the marker the orchestrator searches for.

/// Pinned client-side entry point of the rendering library. Self-contained
/// ESM bundle; the browser needs network access to fetch it.
pub const MERMAID_ESM_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";

/// Builds a standalone HTML page embedding `code` as a mermaid diagram.
///
/// `code` is expected to be already normalized ([`crate::normalize`]); it is
/// HTML-escaped here so markup containing `<` or `&` survives the round trip
/// through the DOM.
pub fn preview_page(code: &str) -> String {
    let escaped = escape_html(code);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Mermaid preview</title>
</head>
<body>
<pre class="mermaid">
{escaped}
</pre>
<script type="module">
import mermaid from "{MERMAID_ESM_URL}";
mermaid.initialize({{ startOnLoad: true }});
</script>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
