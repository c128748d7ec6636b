use piranhito::beautify::collapse_blank_runs;
use piranhito::constants::EMPTY_CONDITION_SENTINEL;
use piranhito::reformat::reformat;

#[test]
fn test_empty_conditions_become_sentinel() {
    assert_eq!(reformat("if ()"), EMPTY_CONDITION_SENTINEL);
    assert_eq!(reformat("if()"), EMPTY_CONDITION_SENTINEL);
    assert_eq!(reformat("if ()"), "if (!_CE_) /*Piranhito?@*/ ");
}

#[test]
fn test_reformat_is_idempotent() {
    let once = reformat("if () {\n}\nfoo( \n )\nif(( ))");
    assert_eq!(reformat(&once), once);
}

#[test]
fn test_condition_emptied_by_stripping() {
    // What remains of `if (/*S*/ tracing /*E*/ ) {` after the markers went away.
    let text = "    if ( \n ) {\n        run()\n    }\n";
    assert_eq!(reformat(text), "    if  {\n        run()\n    }\n");
}

#[test]
fn test_calls_without_arguments_are_kept() {
    let text = "let w = Window()\nw.show()\n";
    assert_eq!(reformat(text), text);
}

#[test]
fn test_collapse_removes_double_newlines() {
    let collapsed = collapse_blank_runs("a\n\n\nb\n\n\n\nc\n\n");
    assert_eq!(collapsed, "a\nb\nc\n");
    assert!(!collapsed.contains("\n\n"));
}

#[test]
fn test_collapse_keeps_text_without_blank_runs() {
    let text = "struct A {\n    let b: Int\n}\n";
    assert_eq!(collapse_blank_runs(text), text);
}

#[test]
fn test_collapse_drops_indentation_only_lines() {
    assert_eq!(
        collapse_blank_runs("func a() {\n    \n    b()\n  \n}\n"),
        "func a() {\n    b()\n}\n"
    );
}

#[test]
fn test_crlf_condition_emptied_by_stripping() {
    let text = "    if ( \r\n ) {\r\n        run()\r\n    }\r\n";
    assert_eq!(reformat(text), "    if  {\r\n        run()\r\n    }\r\n");
    assert_eq!(reformat("f(\r\n)"), "f");
}
