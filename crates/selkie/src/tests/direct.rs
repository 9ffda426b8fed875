use crate::direct::{
    DOMPURIFY_ADDHOOK_DEFECT, DiagramParser, DirectValidator, ParseError, ParseOptions,
    SyntaxCheck,
};
use crate::verdict::Verdict;
use crate::{EMPTY_DIAGRAM, NO_ERRORS, parse_mermaid_sync};

/// Stub standing in for the external library's parse entry point.
struct FailingParser {
    message: Option<&'static str>,
}

impl DiagramParser for FailingParser {
    fn parse(&self, _text: &str, _options: ParseOptions) -> Result<(), ParseError> {
        Err(ParseError {
            message: self.message.map(str::to_string),
        })
    }
}

#[test]
fn empty_inputs_short_circuit() {
    for input in ["", "   ", "```mermaid\n```", "``````"] {
        assert_eq!(parse_mermaid_sync(input), EMPTY_DIAGRAM, "for {input:?}");
    }
}

#[test]
fn valid_flowchart_passes() {
    assert_eq!(parse_mermaid_sync("graph TD; A-->B;"), NO_ERRORS);
    assert_eq!(
        parse_mermaid_sync("```mermaid\ngraph TD; A-->B;\n```"),
        NO_ERRORS
    );
}

#[test]
fn dangling_flowchart_edge_is_rejected() {
    let verdict = parse_mermaid_sync("graph TD; A-->");
    assert_ne!(verdict, NO_ERRORS);
    assert!(
        verdict.contains("Parse error on line"),
        "unexpected verdict: {verdict}"
    );
}

#[test]
fn sequence_message_without_payload_is_rejected() {
    let verdict = parse_mermaid_sync("sequenceDiagram\nAlice->>Bob");
    assert_ne!(verdict, NO_ERRORS);
}

#[test]
fn pie_entry_without_numeric_value_is_rejected() {
    assert_eq!(parse_mermaid_sync("pie\n\"A\" : 30\n\"B\" : 70"), NO_ERRORS);
    assert_ne!(parse_mermaid_sync("pie\n\"A\" : thirty"), NO_ERRORS);
}

#[test]
fn unrecognized_diagram_reports_detection_failure() {
    let verdict = parse_mermaid_sync("certainly not mermaid");
    assert_ne!(verdict, NO_ERRORS);
    assert_ne!(verdict, EMPTY_DIAGRAM);
}

#[test]
fn known_defect_message_remaps_to_success() {
    let validator = DirectValidator::with_parser(FailingParser {
        message: Some(DOMPURIFY_ADDHOOK_DEFECT),
    });
    assert_eq!(validator.validate("graph TD; A-->B;"), Verdict::NoErrors);
}

#[test]
fn other_parser_messages_pass_through_verbatim() {
    let validator = DirectValidator::with_parser(FailingParser {
        message: Some("Parse error on line 1: something"),
    });
    assert_eq!(
        validator.validate("graph TD; A-->B;"),
        Verdict::SyntaxError("Parse error on line 1: something".to_string())
    );
}

#[test]
fn message_less_failures_become_unknown_error() {
    let validator = DirectValidator::with_parser(FailingParser { message: None });
    assert_eq!(
        validator.validate("graph TD; A-->B;").to_string(),
        "Unknown error."
    );
}

#[test]
fn lenient_options_suppress_parse_failures() {
    let check = SyntaxCheck::new();
    assert!(check.parse("graph TD; A-->", ParseOptions::strict()).is_err());
    assert!(check.parse("graph TD; A-->", ParseOptions::lenient()).is_ok());
}
