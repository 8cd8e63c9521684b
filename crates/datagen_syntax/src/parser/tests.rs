#[cfg(test)]
/// Parser unit tests.
///
/// These cover the syntactic forms of the language and the parser's error recovery
/// (one error per bad declaration, member or statement, no cascades).
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<CompilationUnit, Vec<CompileError>> {
        let tokens = lexer::lex(source).map_err(|_| vec![])?;
        parse(&tokens)
    }

    fn only_type(unit: &CompilationUnit) -> &TypeDecl {
        match &unit.declarations[0].node {
            Declaration::Type(t) => t,
            other => panic!("Expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_annotated_class() {
        let source = r#"
@Data
class Person {
    name: String;
    pub age: Int = 0;
    raw = 3;

    new(name: String) {
        this.name = name;
    }

    fn describe(): String {
        return this.name;
    }

    init {
        this.age = 1;
    }

    class Badge {
        label: String;
    }
}
"#;
        let unit = parse_str(source).unwrap();
        let person = only_type(&unit);
        assert_eq!(person.name, "Person");
        assert_eq!(person.annotations.len(), 1);
        assert_eq!(person.annotations[0].node.name(), "Data");

        let kinds: Vec<_> = person.members.iter().map(|m| m.node.kind_name()).collect();
        assert_eq!(
            kinds,
            vec!["field", "field", "field", "constructor", "method", "initializer", "nested type"]
        );

        let fields: Vec<_> = person.fields().map(|(_, f, _)| f).collect();
        assert_eq!(fields[0].ty.as_ref().map(|t| t.node.to_string()), Some("String".to_string()));
        assert_eq!(fields[1].visibility, Visibility::Public);
        assert!(fields[1].default.is_some());
        assert!(fields[2].ty.is_none(), "untyped field keeps ty = None");
    }

    #[test]
    fn test_member_spans_cover_source() {
        let source = "class A { name: String; }";
        let unit = parse_str(source).unwrap();
        let a = only_type(&unit);
        let span = a.members[0].span;
        assert_eq!(&source[span.start..span.end], "name: String;");
        let decl_span = unit.declarations[0].span;
        assert_eq!(&source[decl_span.start..decl_span.end], source);
    }

    #[test]
    fn test_qualified_annotation() {
        let unit = parse_str("@app.meta.Data pub class A {}").unwrap();
        let a = only_type(&unit);
        assert_eq!(a.annotations[0].node.dotted(), "app.meta.Data");
        assert_eq!(a.annotations[0].node.name(), "Data");
        assert_eq!(a.visibility, Visibility::Public);
    }

    #[test]
    fn test_method_without_return_type_is_void() {
        let unit = parse_str("class A { fn touch() { } }").unwrap();
        let method = only_type(&unit).find_method("touch").unwrap();
        assert!(method.return_type.node.is_void());
        assert!(method.params.is_empty());
    }

    #[test]
    fn test_generic_and_array_types() {
        let unit = parse_str("class A { m: Map<String, List<Int>>[]; }").unwrap();
        let (_, field, _) = only_type(&unit).fields().next().unwrap();
        let ty = field.ty.as_ref().unwrap();
        insta::assert_snapshot!(ty.node.to_string(), @"Map<String, List<Int>>[]");
    }

    #[test]
    fn test_import_and_function() {
        let unit = parse_str("import app.model.Address;\nfn main() { let p = Person(\"x\"); }").unwrap();
        assert_eq!(unit.declarations.len(), 2);
        match &unit.declarations[0].node {
            Declaration::Import(i) => assert_eq!(i.path, vec!["app", "model", "Address"]),
            other => panic!("Expected import, got {other:?}"),
        }
        match &unit.declarations[1].node {
            Declaration::Function(f) => {
                assert_eq!(f.name, "main");
                assert!(matches!(f.body[0].node, Statement::Let(_)));
            }
            other => panic!("Expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        let unit = parse_str("fn f() { return a + b * c; }").unwrap();
        let Declaration::Function(f) = &unit.declarations[0].node else {
            panic!("Expected function");
        };
        let Statement::Return(Some(expr)) = &f.body[0].node else {
            panic!("Expected return");
        };
        match &expr.node {
            Expr::Binary(left, BinaryOp::Add, right) => {
                assert!(matches!(left.node, Expr::Ident(_)));
                assert!(matches!(right.node, Expr::Binary(_, BinaryOp::Mul, _)));
            }
            other => panic!("Expected addition at the root, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_chain() {
        let unit = parse_str("fn f() { this.items.push(x).len(); }").unwrap();
        let Declaration::Function(f) = &unit.declarations[0].node else {
            panic!("Expected function");
        };
        let Statement::Expr(expr) = &f.body[0].node else {
            panic!("Expected expression statement");
        };
        let Expr::MethodCall(receiver, name, args) = &expr.node else {
            panic!("Expected method call");
        };
        assert_eq!(name, "len");
        assert!(args.is_empty());
        assert!(matches!(receiver.node, Expr::MethodCall(_, ref n, _) if n == "push"));
    }

    #[test]
    fn test_else_if_nests() {
        let unit = parse_str("fn f() { if a { x = 1; } else if b { x = 2; } else { x = 3; } }").unwrap();
        let Declaration::Function(f) = &unit.declarations[0].node else {
            panic!("Expected function");
        };
        let Statement::If(stmt) = &f.body[0].node else {
            panic!("Expected if");
        };
        let else_body = stmt.else_body.as_ref().unwrap();
        assert_eq!(else_body.len(), 1);
        let Statement::If(nested) = &else_body[0].node else {
            panic!("Expected nested if");
        };
        assert!(nested.else_body.is_some());
    }

    #[test]
    fn test_bad_member_is_single_error() {
        let err = parse_str("class A { x: ; y: Int; }").unwrap_err();
        assert_eq!(err.len(), 1, "{err:?}");
        assert!(err[0].message.contains("Expected identifier"), "{}", err[0].message);
    }

    #[test]
    fn test_bad_statements_recover_per_statement() {
        let err = parse_str("class A { fn f() { let = 1; return 1 +; } fn g() {} }").unwrap_err();
        assert_eq!(err.len(), 2, "{err:?}");
    }

    #[test]
    fn test_top_level_junk_recovers_at_next_class() {
        let err = parse_str("junk class A { } class B { x: }").unwrap_err();
        assert_eq!(err.len(), 2, "{err:?}");
        assert!(err[0].message.contains("Expected declaration"));
    }

    #[test]
    fn test_annotation_on_import_is_rejected() {
        let err = parse_str("@Data import a.b;").unwrap_err();
        assert!(err[0].message.contains("not allowed on imports"));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_str("fn f() { f() = 1; }").unwrap_err();
        assert!(err[0].message.contains("Invalid assignment target"));
    }

    #[test]
    fn test_chained_comparison_is_rejected() {
        let err = parse_str("fn f() { return a < b < c; }").unwrap_err();
        assert!(err[0].message.contains("cannot be chained"));
    }

    #[test]
    fn test_unclosed_class_reports_eof() {
        let err = parse_str("class A { x: Int;").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].message.contains("end of file"), "{}", err[0].message);
    }

    #[test]
    fn test_empty_token_stream() {
        assert_eq!(parse(&[]).unwrap(), CompilationUnit::default());
    }
}
