use super::output_of;

#[test]
fn test_println_renders_each_type() {
    let source = r#"
        println(42);
        println("text");
        println(true);
        println(null);
        println([1, "two", [3]]);
        println({ a: 1, b: "x" });
        println({});
        println(println);
    "#;

    let expected = [
        "42",
        "\"text\"",
        "true",
        "null",
        "[1, \"two\", [3]]",
        "{ a: 1, b: \"x\" }",
        "{ }",
        "[Function]",
    ]
    .map(|line| format!("{line}\n"))
    .concat();

    assert_eq!(output_of(source), expected);
}

#[test]
fn test_user_functions_render_as_function() {
    assert_eq!(output_of("fn f() { } println(f);"), "[Function]\n");
}

#[test]
fn test_print_has_no_newline_and_joins_arguments() {
    assert_eq!(output_of("print(1, 2); print(3);"), "1 23");
    assert_eq!(output_of("println(1, \"a\", true);"), "1 \"a\" true\n");
}

#[test]
fn test_print_returns_null() {
    assert_eq!(output_of("println(print(\"x\"));"), "\"x\"null\n");
}

#[test]
fn test_object_rendering_keeps_insertion_order() {
    assert_eq!(
        output_of("println({ zeta: 1, alpha: 2, mid: 3 });"),
        "{ zeta: 1, alpha: 2, mid: 3 }\n"
    );
}

#[test]
fn test_output_is_deterministic_across_fresh_sessions() {
    let source = "
        let xs = [3, 1, 2];
        let i = 0;
        while (i < 3) { print(xs[i]); i = i + 1; }
        println({ done: true });
    ";
    assert_eq!(output_of(source), output_of(source));
    assert_eq!(output_of(source), "312{ done: true }\n");
}
