//! Source text through parse and execute, checked as surface calls.

use dbn::dsl::{ErrorKind, Found, TokenKind};
use dbn::{Interpreter, RecordingSurface, SurfaceCall};

fn trace(src: &str) -> Vec<SurfaceCall> {
    let mut surface = RecordingSurface::default();
    Interpreter::run(src, &mut surface).expect("program should parse");
    surface.into_calls()
}

fn pens(n: usize) -> Vec<SurfaceCall> {
    vec![SurfaceCall::PenSize(1.0); n]
}

#[test]
fn tokens_for_comment_then_command() {
    let tokens = Interpreter::tokenize("// hi\npen 3");
    let summary: Vec<(TokenKind, &str, usize)> = tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Comment, "hi", 1),
            (TokenKind::Command, "pen", 2),
            (TokenKind::Number, "3", 2),
        ]
    );
}

#[test]
fn calls_follow_source_order() {
    let src = r#"
paper 0
pen 2
color 100
line 0 0 100 100
rect 10 10 20 20
circle 50 50 10
"#;
    assert_eq!(
        trace(src),
        vec![
            SurfaceCall::Paper(0.0),
            SurfaceCall::PenSize(2.0),
            SurfaceCall::Color(100.0),
            SurfaceCall::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0
            },
            SurfaceCall::Rect {
                x1: 10.0,
                y1: 10.0,
                x2: 20.0,
                y2: 20.0
            },
            SurfaceCall::Circle {
                x: 50.0,
                y: 50.0,
                r: 10.0
            },
        ]
    );
}

#[test]
fn repeat_issues_body_count_times() {
    assert_eq!(trace("repeat 3 { pen 1 }"), pens(3));
}

#[test]
fn zero_repeat_issues_nothing() {
    assert!(trace("repeat 0 { pen 1 }").is_empty());
}

#[test]
fn negative_repeat_issues_nothing() {
    // `-` lexes as an operator, so negative counts only arise in built programs.
    use dbn::{Command, Program};
    let program = Program::new(vec![Command::Repeat {
        count: -2.0,
        body: vec![Command::Pen { size: 1.0 }],
    }]);
    let mut surface = RecordingSurface::default();
    dbn::execute(&program, &mut surface);
    assert!(surface.calls().is_empty());
}

#[test]
fn negative_repeat_source_does_not_parse() {
    let err = Interpreter::parse("repeat -2 { pen 1 }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectedNumber(Found::Token("-".into())));
}

#[test]
fn nested_repeats_multiply() {
    assert_eq!(trace("repeat 2 { repeat 3 { pen 1 } }"), pens(6));
}

#[test]
fn nested_repeat_interleaves_outer_body() {
    let calls = trace("repeat 2 {\n  color 10\n  repeat 2 pen 1\n}");
    assert_eq!(
        calls,
        vec![
            SurfaceCall::Color(10.0),
            SurfaceCall::PenSize(1.0),
            SurfaceCall::PenSize(1.0),
            SurfaceCall::Color(10.0),
            SurfaceCall::PenSize(1.0),
            SurfaceCall::PenSize(1.0),
        ]
    );
}

#[test]
fn single_statement_body_matches_block() {
    assert_eq!(trace("repeat 2 pen 1"), trace("repeat 2 { pen 1 }"));
}

#[test]
fn variable_arguments_are_rejected() {
    let err = Interpreter::parse("set x 5\nline x 0 10 10").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectedNumber(Found::Token("x".into())));
    assert_eq!(err.line, 2);
    assert_eq!(err.col, 5);
    assert_eq!(
        err.to_string(),
        "expected a number, but found `x` on line 2, column 5"
    );
}

#[test]
fn set_records_variable_without_drawing() {
    let mut surface = RecordingSurface::default();
    let executor = Interpreter::run("set size 5\nset size 7\npen 1", &mut surface).unwrap();
    assert_eq!(executor.variable("size"), Some(7.0));
    assert_eq!(surface.calls(), &[SurfaceCall::PenSize(1.0)]);
}

#[test]
fn unterminated_block_executes_nothing() {
    let mut surface = RecordingSurface::default();
    let err = Interpreter::run("pen 4\nrepeat 2 { pen 1", &mut surface).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedBlock);
    assert!(surface.calls().is_empty());
}

#[test]
fn stray_tokens_are_dropped() {
    assert_eq!(trace("42 pen 1"), pens(1));
}

#[test]
fn color_values_pass_through_unclamped() {
    assert_eq!(
        trace("color 150\ncolor 0"),
        vec![SurfaceCall::Color(150.0), SurfaceCall::Color(0.0)]
    );
}

#[test]
fn reparse_yields_identical_program() {
    let src = "paper 10 // bg\nrepeat 4 {\n  pen 2\n  rect 0 0 5 5\n}\nset n 3";
    let a = Interpreter::parse(src).unwrap();
    let b = Interpreter::parse(src).unwrap();
    assert_eq!(a, b);
}

#[test]
fn program_serializes_to_yaml() {
    let program = Interpreter::parse("repeat 2 { pen 1 }").unwrap();
    let yaml = serde_yaml::to_string(&program).unwrap();
    assert!(yaml.contains("Repeat"));
    assert!(yaml.contains("count: 2.0"));
}

#[test]
fn fractional_and_lenient_numbers() {
    use assert_approx_eq::assert_approx_eq;
    use dbn::Command;

    let program = Interpreter::parse("pen 0.1\ncircle 1.25.9 3. 0.3").unwrap();
    let Command::Pen { size } = program.commands()[0] else {
        panic!("expected Pen");
    };
    assert_approx_eq!(size, 0.1);

    let Command::Circle { x, y, r } = program.commands()[1] else {
        panic!("expected Circle");
    };
    assert_approx_eq!(x, 1.25);
    assert_approx_eq!(y, 3.0);
    assert_approx_eq!(r, 0.3);
}
