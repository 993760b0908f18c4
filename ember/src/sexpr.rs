// S-expression formatter for Ember AST
// Renders parsed programs as readable Lisp-like trees for `ember parse`

use ember_parser::*;

pub fn format_program_as_sexpr(program: &Program) -> String {
    let statements: Vec<String> = program
        .statements
        .iter()
        .map(|statement| format_statement_with_indent(statement, 2))
        .collect();

    match statements.as_slice() {
        [] => "(program)".to_string(),
        [single] if !single.contains('\n') => format!("(program {single})"),
        _ => format!("(program\n  {})", statements.join("\n  ")),
    }
}

fn format_statement_with_indent(statement: &Statement, indent: usize) -> String {
    match &statement.kind {
        StatementKind::VarDeclaration(declaration) => {
            let keyword = if declaration.constant { "const" } else { "let" };
            match &declaration.value {
                Some(value) => format!(
                    "({keyword} {} {})",
                    declaration.name.name,
                    format_expression_with_indent(value, indent + 2)
                ),
                None => format!("({keyword} {})", declaration.name.name),
            }
        }
        StatementKind::FunctionDeclaration(function) => {
            let parameters: Vec<&str> = function
                .parameters
                .iter()
                .map(|parameter| parameter.name.as_str())
                .collect();
            format!(
                "(fn {} ({}){})",
                function.name.name,
                parameters.join(" "),
                format_body(&function.body, indent + 2)
            )
        }
        StatementKind::If(if_statement) => {
            let condition = format_expression_with_indent(&if_statement.condition, indent + 2);
            let pad = " ".repeat(indent + 2);
            let mut out = format!(
                "(if {condition}\n{pad}(then{})",
                format_body(&if_statement.then_body, indent + 4)
            );
            if !if_statement.else_body.is_empty() {
                out.push_str(&format!(
                    "\n{pad}(else{})",
                    format_body(&if_statement.else_body, indent + 4)
                ));
            }
            out.push(')');
            out
        }
        StatementKind::While(while_statement) => format!(
            "(while {}{})",
            format_expression_with_indent(&while_statement.condition, indent + 2),
            format_body(&while_statement.body, indent + 2)
        ),
        StatementKind::Expression(expression) => {
            format_expression_with_indent(expression, indent)
        }
    }
}

// Each body statement on its own line, indented under its parent form
fn format_body(body: &[Statement], indent: usize) -> String {
    let pad = " ".repeat(indent);
    body.iter()
        .map(|statement| format!("\n{pad}{}", format_statement_with_indent(statement, indent)))
        .collect()
}

fn format_expression_with_indent(expr: &Expression, indent: usize) -> String {
    match &expr.kind {
        ExpressionKind::Integer(integer) => format!("(integer {})", integer.value),
        ExpressionKind::String(string) => format!("\"{}\"", string.value.replace('"', "\\\"")),
        ExpressionKind::Identifier(id) => id.name.clone(),
        ExpressionKind::Assignment(assignment) => format_pair(
            "=",
            &format_expression_with_indent(&assignment.target, indent + 2),
            &format_expression_with_indent(&assignment.value, indent + 2),
            indent,
        ),
        ExpressionKind::BinaryOp(operation) => format_pair(
            operation.operator.as_str(),
            &format_expression_with_indent(&operation.left, indent + 2),
            &format_expression_with_indent(&operation.right, indent + 2),
            indent,
        ),
        ExpressionKind::Comparison(operation) => format_pair(
            operation.operator.as_str(),
            &format_expression_with_indent(&operation.left, indent + 2),
            &format_expression_with_indent(&operation.right, indent + 2),
            indent,
        ),
        ExpressionKind::UnaryOp(operation) => format!(
            "({} {})",
            operation.operator.as_str(),
            format_expression_with_indent(&operation.operand, indent + 2)
        ),
        ExpressionKind::Call(call) => {
            let mut parts = vec![format_expression_with_indent(&call.callee, indent + 2)];
            parts.extend(
                call.arguments
                    .iter()
                    .map(|argument| format_expression_with_indent(argument, indent + 2)),
            );
            format!("(call {})", parts.join(" "))
        }
        ExpressionKind::Member(member) => {
            let form = if member.computed { "index" } else { "member" };
            format_pair(
                form,
                &format_expression_with_indent(&member.object, indent + 2),
                &format_expression_with_indent(&member.property, indent + 2),
                indent,
            )
        }
        ExpressionKind::Array(array) => {
            let elements: Vec<String> = array
                .elements
                .iter()
                .map(|element| format_expression_with_indent(element, indent + 2))
                .collect();
            if elements.is_empty() {
                "(array)".to_string()
            } else {
                format!("(array {})", elements.join(" "))
            }
        }
        ExpressionKind::Object(object) => {
            let properties: Vec<String> = object
                .properties
                .iter()
                .map(|property| match &property.value {
                    Some(value) => format!(
                        "({} {})",
                        property.key.name,
                        format_expression_with_indent(value, indent + 4)
                    ),
                    None => format!("({})", property.key.name),
                })
                .collect();
            if properties.is_empty() {
                "(object)".to_string()
            } else {
                format!("(object {})", properties.join(" "))
            }
        }
    }
}

fn format_pair(head: &str, left: &str, right: &str, indent: usize) -> String {
    // Simple expressions on one line
    if !left.contains('\n') && !right.contains('\n') && (left.len() + right.len() + head.len()) < 50
    {
        format!("({head} {left} {right})")
    } else {
        let pad = " ".repeat(indent + 2);
        format!("({head}\n{pad}{left}\n{pad}{right})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sexpr(source: &str) -> String {
        format_program_as_sexpr(&parse_program(source).unwrap())
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(sexpr(""), "(program)");
    }

    #[test]
    fn test_precedence_is_visible() {
        assert_eq!(
            sexpr("2 + 3 * 4"),
            "(program (+ (integer 2) (* (integer 3) (integer 4))))"
        );
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            sexpr("let x = 1; const y = \"a\"; let z;"),
            "(program\n  (let x (integer 1))\n  (const y \"a\")\n  (let z))"
        );
    }

    #[test]
    fn test_function_and_if() {
        let expected = "(program\n  (fn f (n)\n    (if (< n (integer 2))\n      (then\n        n)\n      (else\n        (call f (- n (integer 1)))))))";
        assert_eq!(
            sexpr("fn f(n) { if (n < 2) { n } else { f(n - 1) } }"),
            expected
        );
    }

    #[test]
    fn test_collections_and_members() {
        assert_eq!(
            sexpr("let o = { a: [1], b }; o.a[0]"),
            "(program\n  (let o (object (a (array (integer 1))) (b)))\n  (index (member o a) (integer 0)))"
        );
    }
}
