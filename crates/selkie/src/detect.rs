use regex::Regex;

use crate::error::Result;

#[derive(Debug, thiserror::Error)]
#[error("No diagram type detected for text: {text}")]
pub struct DetectTypeError {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Detector {
    pub id: &'static str,
    matcher: Regex,
}

/// Ordered diagram-type detectors.
///
/// The registration order is significant and mirrors Mermaid's own: the first
/// matching detector wins, so e.g. `classDiagram-v2` text must be claimed by
/// the `classDiagram` detector before a looser prefix could.
#[derive(Debug, Clone)]
pub struct DetectorRegistry {
    detectors: Vec<Detector>,
    frontmatter_re: Regex,
    any_comment_re: Regex,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            frontmatter_re: Regex::new(r"(?s)^-{3}\s*[\n\r](.*?)[\n\r]-{3}\s*[\n\r]+").unwrap(),
            any_comment_re: Regex::new(r"(?m)\s*%%.*\n").unwrap(),
        }
    }

    pub fn add(&mut self, id: &'static str, pattern: &str) {
        self.detectors.push(Detector {
            id,
            matcher: Regex::new(pattern).unwrap(),
        });
    }

    /// Detects the diagram type of `text`.
    ///
    /// Front-matter, `%%{...}%%` directives and `%%` comments are stripped
    /// before matching, so a diagram whose first visible line is a comment
    /// still detects correctly.
    pub fn detect_type(&self, text: &str) -> Result<&'static str> {
        let no_frontmatter = self.frontmatter_re.replace(text, "").to_string();
        let no_directives = remove_directives(&no_frontmatter);
        let cleaned = self
            .any_comment_re
            .replace_all(&no_directives, "\n")
            .to_string();

        for det in &self.detectors {
            if det.matcher.is_match(&cleaned) {
                return Ok(det.id);
            }
        }

        Err(DetectTypeError { text: cleaned }.into())
    }

    /// The detector set of Mermaid 11, in its registration order, for the
    /// default site config (dagre-wrapper renderers; no ELK overrides).
    pub fn default_mermaid_11() -> Self {
        let mut reg = Self::new();

        reg.add("error", r"(?i)^\s*error\s*$");
        reg.add("---", r"^\s*---");

        // Lazy-loaded "large feature" diagrams register first.
        reg.add("mindmap", r"^\s*mindmap");
        reg.add("architecture", r"^\s*architecture");

        // Mermaid's base registration order.
        // Matches Mermaid's upstream regex exactly (note the missing grouping in JS).
        reg.add("c4", r"^\s*C4Context|C4Container|C4Component|C4Dynamic|C4Deployment");
        reg.add("kanban", r"^\s*kanban");
        reg.add("classDiagram", r"^\s*classDiagram(-v2)?");
        reg.add("er", r"^\s*erDiagram");
        reg.add("gantt", r"^\s*gantt");
        reg.add("info", r"^\s*info");
        reg.add("pie", r"^\s*pie");
        reg.add("requirement", r"^\s*requirement(Diagram)?");
        reg.add("sequence", r"^\s*sequenceDiagram");
        reg.add("flowchart-v2", r"^\s*(flowchart|graph)");
        reg.add("timeline", r"^\s*timeline");
        reg.add("gitGraph", r"^\s*gitGraph");
        reg.add("stateDiagram", r"^\s*stateDiagram(-v2)?");
        reg.add("journey", r"^\s*journey");
        reg.add("quadrantChart", r"^\s*quadrantChart");
        reg.add("sankey", r"^\s*sankey(-beta)?");
        reg.add("packet", r"^\s*packet(-beta)?");
        reg.add("xychart", r"^\s*xychart(-beta)?");
        reg.add("block", r"^\s*block(-beta)?");
        reg.add("radar", r"^\s*radar-beta");
        reg.add("treemap", r"^\s*treemap");

        reg
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::default_mermaid_11()
    }
}

fn remove_directives(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(rel) = text[pos..].find("%%{") {
        let start = pos + rel;
        out.push_str(&text[pos..start]);
        let after_start = start + 3;
        if let Some(rel_end) = text[after_start..].find("}%%") {
            pos = after_start + rel_end + 3;
        } else {
            return out;
        }
    }
    out.push_str(&text[pos..]);
    out
}
