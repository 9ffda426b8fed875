use crate::detect::DetectorRegistry;
use crate::detect_mermaid_diagram_type_sync;

fn detect(text: &str) -> &'static str {
    DetectorRegistry::default_mermaid_11()
        .detect_type(text)
        .unwrap_or_else(|e| panic!("expected a detection for {text:?}: {e}"))
}

#[test]
fn detects_core_diagram_kinds() {
    assert_eq!(detect("graph TD; A-->B;"), "flowchart-v2");
    assert_eq!(detect("flowchart LR\n  A --> B"), "flowchart-v2");
    assert_eq!(detect("sequenceDiagram\n  Alice->>Bob: Hello"), "sequence");
    assert_eq!(detect("pie\n  \"A\" : 30"), "pie");
    assert_eq!(detect("erDiagram\n  A ||--o{ B : has"), "er");
    assert_eq!(detect("gantt\n  title X"), "gantt");
    assert_eq!(detect("journey\n  title Day"), "journey");
    assert_eq!(detect("gitGraph\n  commit"), "gitGraph");
    assert_eq!(detect("mindmap\n  root"), "mindmap");
}

#[test]
fn version_suffixes_share_one_detector() {
    assert_eq!(detect("classDiagram\nA <|-- B"), "classDiagram");
    assert_eq!(detect("classDiagram-v2\nA <|-- B"), "classDiagram");
    assert_eq!(detect("stateDiagram\n[*] --> S"), "stateDiagram");
    assert_eq!(detect("stateDiagram-v2\n[*] --> S"), "stateDiagram");
}

#[test]
fn detects_c4_context() {
    assert_eq!(detect("C4Context\n  title System"), "c4");
}

#[test]
fn strips_comments_and_directives_before_matching() {
    assert_eq!(detect("%% a comment\ngraph TD; A-->B;\n"), "flowchart-v2");
    assert_eq!(
        detect("%%{init: {\"theme\": \"dark\"}}%%\nsequenceDiagram\nAlice->>Bob: hi"),
        "sequence"
    );
}

#[test]
fn unrecognized_text_is_an_error_internally() {
    let reg = DetectorRegistry::default_mermaid_11();
    assert!(reg.detect_type("this is not a diagram").is_err());
}

#[test]
fn public_surface_collapses_failures_to_empty_string() {
    assert_eq!(detect_mermaid_diagram_type_sync("this is not a diagram"), "");
    assert_eq!(detect_mermaid_diagram_type_sync(""), "");
    assert_eq!(
        detect_mermaid_diagram_type_sync("```mermaid\ngraph TD; A-->B;\n```"),
        "flowchart-v2"
    );
}
