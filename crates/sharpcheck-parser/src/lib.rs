pub mod parser;
pub mod scope;

pub use parser::{parse, Parser};
pub use scope::{ScopeStack, SymbolTable};

#[cfg(test)]
mod tests {
    use super::*;
    use sharpcheck_lexer::tokenize;
    use sharpcheck_syntax::error::{Error, ErrorKind};
    use sharpcheck_syntax::types::Type;

    fn analyze(input: &str) -> Result<SymbolTable, Error> {
        parse(tokenize(input))
    }

    fn expect_ok(input: &str) -> SymbolTable {
        match analyze(input) {
            Ok(globals) => globals,
            Err(e) => panic!("Analysis failed: {}\nInput: {}", e, input),
        }
    }

    fn expect_error(input: &str, kind: ErrorKind) -> Error {
        match analyze(input) {
            Ok(_) => panic!("Expected {} but analysis succeeded: {}", kind, input),
            Err(e) => {
                assert_eq!(e.kind, kind, "Wrong error ({}) for: {}", e, input);
                e
            }
        }
    }

    /// Wraps statements in a namespace, class and method.
    fn in_method(body: &str) -> String {
        format!(
            "namespace App {{ public class Main {{ public int Run(int arg) {{ {} }} }} }}",
            body
        )
    }

    #[test]
    fn test_minimal_program() {
        let src = "using System;\n\
                   namespace App\n\
                   {\n\
                       public class Program\n\
                       {\n\
                           public int count;\n\
                           public int Run() { }\n\
                       }\n\
                   }\n";
        let globals = expect_ok(src);
        assert_eq!(globals.get("count"), Some(Type::Int));
        assert!(!globals.contains("Run"));
    }

    #[test]
    fn test_empty_program() {
        assert!(expect_ok("").is_empty());
        expect_ok("using System; using Collections;");
    }

    #[test]
    fn test_duplicate_field() {
        let src = "namespace A {\n public class B {\n public int x;\n private int x;\n }\n}";
        let err = expect_error(src, ErrorKind::DuplicateDeclaration);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn test_assign_string_to_int() {
        let err = expect_error(&in_method("int x; x = \"hi\";"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("STRING"), "{}", err.msg);
        assert!(err.msg.contains("INT"), "{}", err.msg);
    }

    #[test]
    fn test_for_loop_post_clause() {
        expect_ok(&in_method("for (int i = 0; i < 10; i += 1) { arg = arg + i; }"));
        expect_ok(&in_method("for (int i = 10; i > 0; i -- 1) { }"));
        expect_error(
            &in_method("for (int i = 0; i < 10; i = i + 2) { }"),
            ErrorKind::Syntax,
        );
        expect_error(&in_method("for (int i = 0; i < 10; i += n) { }"), ErrorKind::Syntax);
        expect_error(
            &in_method("for (int i = 0; i < 10; j += 1) { }"),
            ErrorKind::UndeclaredVariable,
        );
    }

    #[test]
    fn test_for_variable_lives_in_method_scope() {
        expect_error(
            &in_method("for (int i = 0; i < 3; i++ 1) { } for (int i = 0; i < 3; i++ 1) { }"),
            ErrorKind::DuplicateDeclaration,
        );
    }

    #[test]
    fn test_undeclared_variable() {
        let err = expect_error(&in_method("int a = b;"), ErrorKind::UndeclaredVariable);
        assert!(err.msg.contains("'b'"));
        expect_error(&in_method("total = 1;"), ErrorKind::UndeclaredVariable);
    }

    #[test]
    fn test_parameters_are_visible_in_body() {
        let src = "namespace A { public class B { public int Add(int a, int b) { int c = a + b; } } }";
        expect_ok(src);
    }

    #[test]
    fn test_duplicate_parameter() {
        let src = "namespace A { public class B { public int F(int a, float a) { } } }";
        expect_error(src, ErrorKind::DuplicateDeclaration);
        let src = "namespace A { public class B { public int F(int a) { int a; } } }";
        expect_error(src, ErrorKind::DuplicateDeclaration);
    }

    #[test]
    fn test_method_locals_do_not_leak() {
        let src = "namespace A { public class B {\n\
                   public int F() { int local = 1; }\n\
                   public int G() { local = 2; }\n\
                   } }";
        let err = expect_error(src, ErrorKind::UndeclaredVariable);
        assert_eq!(err.line, 3);

        let src = "namespace A { public class B {\n\
                   public int F() { int tmp = 1; }\n\
                   public int G() { string tmp = \"x\"; }\n\
                   } }";
        let globals = expect_ok(src);
        assert!(globals.is_empty());
    }

    #[test]
    fn test_fields_not_visible_in_methods() {
        let src = "namespace A { public class B {\n\
                   private int total;\n\
                   public int F(int n) { total = n; }\n\
                   } }";
        let err = expect_error(src, ErrorKind::UndeclaredVariable);
        assert!(err.msg.contains("'total'"), "{}", err.msg);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_local_may_reuse_field_name() {
        let src = "namespace A { public class B { public string name; public int F() { int name = 3; name = 4; } } }";
        let globals = expect_ok(src);
        assert_eq!(globals.get("name"), Some(Type::String));
    }

    #[test]
    fn test_number_typing() {
        expect_ok(&in_method("float f = 2.5f; int i = 3; f = f * 1f;"));
        expect_error(&in_method("float g = 2.5;"), ErrorKind::TypeMismatch);
        expect_error(&in_method("int x = 1 + 2f;"), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_comparisons_yield_bool() {
        expect_ok(&in_method("bool b = 1 < 2; bool c = arg == 3; bool d = \"a\" != \"b\";"));
        expect_error(&in_method("int c = 1 < 2;"), ErrorKind::TypeMismatch);
        let err = expect_error(&in_method("bool c = 1 < \"two\";"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("'<'"));
    }

    #[test]
    fn test_logical_operators_require_bool() {
        expect_ok(&in_method("bool b = 1 < 2 && 3 > 2 || arg == 0;"));
        expect_ok(&in_method("bool t = 1 < 2; bool u = t && arg > 0;"));
        let err = expect_error(&in_method("bool b = 1 && 2;"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("'&&'"));
        expect_error(&in_method("bool b = 1 < 2 || 0;"), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_parenthesized_expression_type() {
        expect_ok(&in_method("int x = (1 + 2) * (arg - 4);"));
        expect_ok(&in_method("bool ok = (arg > 1) && (arg < 9);"));
        expect_error(&in_method("int x = (1 + 2;"), ErrorKind::Syntax);
    }

    #[test]
    fn test_string_values() {
        expect_ok(&in_method("string s = \"a\" + \"b\"; s = s + \"c\";"));
        let err = expect_error(&in_method("string s = \"a\" + 1;"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("'+'"), "{}", err.msg);
        assert!(err.msg.contains("STRING"), "{}", err.msg);
        expect_error(&in_method("int n = arg - \"x\";"), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_equality_operands_must_match() {
        let err = expect_error(&in_method("bool b = 1 == \"a\";"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("'=='"), "{}", err.msg);
        let err = expect_error(&in_method("bool b = arg != 2f;"), ErrorKind::TypeMismatch);
        assert!(err.msg.contains("'!='"), "{}", err.msg);
    }

    #[test]
    fn test_literal_keywords_and_chars_are_not_factors() {
        let err = expect_error(&in_method("bool b = true;"), ErrorKind::Syntax);
        assert!(err.msg.contains("TRUE"), "{}", err.msg);
        expect_error(&in_method("bool b = false;"), ErrorKind::Syntax);
        let err = expect_error(&in_method("char c = 'z';"), ErrorKind::Syntax);
        assert!(err.msg.contains("CHAR"), "{}", err.msg);
    }

    #[test]
    fn test_multiple_declarators_and_assignments() {
        expect_ok(&in_method("int a = 1, b, c = 3; a = 2, b = a + c;"));
        expect_error(&in_method("int a = 1, b = \"x\";"), ErrorKind::TypeMismatch);
        expect_error(&in_method("int a, a;"), ErrorKind::DuplicateDeclaration);
    }

    #[test]
    fn test_control_flow_statements() {
        expect_ok(&in_method("if (arg > 0) { arg = 1; } else { arg = 2; }"));
        expect_ok(&in_method("if (arg > 0) { }"));
        expect_ok(&in_method("while (arg < 10) { arg = arg + 1; }"));
        expect_ok(&in_method("do { arg = arg - 1; } while (arg > 0);"));
        expect_ok(&in_method("foreach (int item in arg) { arg = arg + 1; }"));
        expect_error(&in_method("do { } while (arg > 0)"), ErrorKind::Syntax);
        expect_error(&in_method("if arg > 0 { }"), ErrorKind::Syntax);
    }

    #[test]
    fn test_foreach_variable_is_not_declared() {
        let src = "namespace A { public class B { public int F(int x) { foreach (int x in x) { } } } }";
        expect_ok(src);
        let err = expect_error(
            &in_method("foreach (int item in arg) { arg = item; }"),
            ErrorKind::UndeclaredVariable,
        );
        assert!(err.msg.contains("'item'"), "{}", err.msg);
        // no duplicate when the same name is reused
        expect_ok(&in_method("foreach (int v in arg) { } foreach (int v in arg) { } int v = 1;"));
    }

    #[test]
    fn test_other_primitive_types() {
        expect_ok(&in_method("long l; short s; byte b; decimal d; double x; l = l;"));
    }

    #[test]
    fn test_comment_handling() {
        let src = "namespace A {\n\
                   // leading comment\n\
                   public class B {\n\
                   /* field */ public int x;\n\
                   public int F(int y) {\n\
                   // statement comment\n\
                   y = 1 /* inline */ + 2;\n\
                   }\n\
                   }\n\
                   }";
        expect_ok(src);

        // not filtered inside parameter lists
        let src = "namespace A { public class B { public int F(int a /* why */) { } } }";
        expect_error(src, ErrorKind::Syntax);

        // nor at the top level
        expect_error("// header\nusing System;", ErrorKind::Syntax);
    }

    #[test]
    fn test_syntax_errors_report_line() {
        let err = expect_error("using System\nnamespace A { }", ErrorKind::Syntax);
        assert_eq!(err.line, 2);
        assert!(err.msg.contains("SEMICOLON"), "{}", err.msg);

        let err = expect_error("namespace A {\n public class {", ErrorKind::Syntax);
        assert_eq!(err.line, 2);
        assert!(err.msg.contains("IDENTIFIER"), "{}", err.msg);
    }

    #[test]
    fn test_missing_access_modifier() {
        let err = expect_error("namespace A { class B { } }", ErrorKind::Syntax);
        assert!(err.msg.contains("access modifier"));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = expect_error("namespace A {", ErrorKind::Syntax);
        assert!(err.msg.contains("end of input"), "{}", err.msg);
        assert_eq!(err.line, 1);
        expect_error(&in_method("int x = ").replace("} } }", ""), ErrorKind::Syntax);
    }

    #[test]
    fn test_unsupported_statement() {
        expect_error(&in_method("else { }"), ErrorKind::Syntax);
        expect_error(&in_method("1 + 2;"), ErrorKind::Syntax);
        // `return` is not a keyword, so this is an assignment to an unknown name
        expect_error(&in_method("return 1;"), ErrorKind::UndeclaredVariable);
    }

    #[test]
    fn test_parser_can_parse_expression_directly() {
        let mut parser = Parser::new(tokenize("(1 + 2) * 3 >= 4"));
        assert_eq!(parser.parse_expr().unwrap(), Type::Bool);
        let mut parser = Parser::new(tokenize("\"a\" + \"b\""));
        assert_eq!(parser.parse_expr().unwrap(), Type::String);
    }
}
