#[cfg(test)]
mod parser_tests {
    use monkey::ast::*;
    use monkey::ast_printer::AstPrinter;
    use monkey::error::ParseError;
    use monkey::parser::{parse, Parser, ParserOptions, MAX_NESTING_DEPTH};
    use monkey::token::TokenKind;
    use monkey::tokenizer::Tokenizer;

    /// Parse `source`, failing the test on any diagnostic.
    fn parse_ok(source: &str) -> Program<'_> {
        let (program, errors) = parse(source);

        assert!(
            errors.is_empty(),
            "unexpected parser errors for {:?}: {:?}",
            source,
            errors
        );

        program
    }

    fn single_expression<'p, 'a>(program: &'p Program<'a>) -> &'p Expression<'a> {
        assert_eq!(program.len(), 1, "expected one statement in {}", program);

        match &program.statements[0] {
            Statement::Expression(stmt) => &stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn messages(errors: &[ParseError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_let_and_return_statements() {
        let program = parse_ok("let five = 5; return 5;");

        assert_eq!(program.len(), 2);

        match &program.statements[0] {
            Statement::Let(stmt) => {
                assert_eq!(stmt.token.kind, TokenKind::LET);
                assert_eq!(stmt.name.value, "five");
                assert_eq!(stmt.name.token.literal, "five");
                assert!(stmt.value.is_none());
            }
            other => panic!("expected let statement, got {:?}", other),
        }

        match &program.statements[1] {
            Statement::Return(stmt) => {
                assert_eq!(stmt.token.kind, TokenKind::RETURN);
                assert!(stmt.value.is_none());
            }
            other => panic!("expected return statement, got {:?}", other),
        }

        assert_eq!(program.token_literal(), "let");
        assert_eq!(program.to_string(), "let five = ;return ;");
    }

    #[test]
    fn test_let_value_tokens_are_skipped() {
        let program = parse_ok("let x = a + b * c; x;");

        assert_eq!(program.len(), 2);
        assert!(matches!(program.statements[0], Statement::Let(_)));
        assert_eq!(program.statements[1].to_string(), "x");
    }

    #[test]
    fn test_let_without_semicolon_stops_at_eof() {
        let program = parse_ok("let x = 5");

        assert_eq!(program.len(), 1);
        assert_eq!(program.to_string(), "let x = ;");

        let program = parse_ok("return");
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_let_missing_assign_records_error() {
        let (program, errors) = parse("let x 5;");

        assert!(!errors.is_empty());
        assert_eq!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: TokenKind::ASSIGN,
                found: TokenKind::INT,
            }
        );
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be =, got INT instead"
        );
        assert!(program
            .statements
            .iter()
            .all(|stmt| !matches!(stmt, Statement::Let(_))));
    }

    #[test]
    fn test_let_errors_accumulate_in_order() {
        let (_, errors) = parse("let = 10; let 838383;");

        assert_eq!(
            messages(&errors)[..],
            [
                "expected next token to be IDENT, got = instead",
                "no prefix parse function for = found",
                "expected next token to be IDENT, got INT instead",
            ]
        );
    }

    #[test]
    fn test_identifier_expression() {
        let program = parse_ok("foobar;");

        match single_expression(&program) {
            Expression::Identifier(ident) => {
                assert_eq!(ident.value, "foobar");
                assert_eq!(ident.token.kind, TokenKind::IDENT);
            }
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_literal_expression() {
        let program = parse_ok("5;");

        match single_expression(&program) {
            Expression::Integer(int) => {
                assert_eq!(int.value, 5);
                assert_eq!(int.token.literal, "5");
            }
            other => panic!("expected integer literal, got {:?}", other),
        }
    }

    #[test]
    fn test_leading_zero_integer_is_octal() {
        let program = parse_ok("010");

        match single_expression(&program) {
            Expression::Integer(int) => assert_eq!(int.value, 8),
            other => panic!("expected integer literal, got {:?}", other),
        }

        let (_, errors) = parse("09;");
        assert_eq!(messages(&errors), ["could not parse \"09\" as integer"]);
    }

    #[test]
    fn test_integer_overflow_records_error() {
        let (program, errors) = parse("99999999999999999999;");

        assert!(program.is_empty());
        assert_eq!(
            errors,
            [ParseError::InvalidInteger(String::from(
                "99999999999999999999"
            ))]
        );
    }

    #[test]
    fn test_float_has_no_prefix_rule() {
        let (program, errors) = parse("3.14; x");

        assert_eq!(messages(&errors), ["no prefix parse function for FLOAT found"]);
        assert_eq!(program.len(), 1);
        assert_eq!(program.to_string(), "x");
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [("!5;", "!", "5"), ("-15;", "-", "15"), ("!foo;", "!", "foo")];

        for (source, operator, operand) in cases {
            let program = parse_ok(source);

            match single_expression(&program) {
                Expression::Prefix(prefix) => {
                    assert_eq!(prefix.operator, operator);
                    assert_eq!(prefix.right.to_string(), operand);
                }
                other => panic!("expected prefix expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_infix_expressions() {
        let operators = ["+", "-", "*", "/", ">", "<", "==", "!="];

        for operator in operators {
            let source = format!("5 {} 6;", operator);
            let program = parse_ok(&source);

            match single_expression(&program) {
                Expression::Infix(infix) => {
                    assert_eq!(infix.operator, operator);
                    assert_eq!(infix.left.to_string(), "5");
                    assert_eq!(infix.right.to_string(), "6");
                }
                other => panic!("expected infix expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c", "(a + (b * c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("(a + b) * c", "((a + b) * c)"),
            ("-(5 + 5)", "(-(5 + 5))"),
        ];

        for (source, expected) in cases {
            assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_operator_without_infix_rule_ends_expression() {
        let (program, errors) = parse("a <= b");

        // `<=` has no infix rule, so `a` stands alone and `<=` starts a
        // new (failing) expression statement.
        assert_eq!(program.statements[0].to_string(), "a");
        assert_eq!(messages(&errors), ["no prefix parse function for <= found"]);
    }

    #[test]
    fn test_missing_operand_yields_no_statement() {
        let (program, errors) = parse("5 + ;");

        assert!(program.is_empty());
        assert_eq!(messages(&errors), ["no prefix parse function for ; found"]);
    }

    #[test]
    fn test_unclosed_group_records_error() {
        let (program, errors) = parse("(a + b");

        assert!(program.is_empty());
        assert_eq!(messages(&errors), ["expected next token to be ), got EOF instead"]);
    }

    #[test]
    fn test_illegal_token_has_no_prefix_rule() {
        let (program, errors) = parse("@; y;");

        assert_eq!(messages(&errors), ["no prefix parse function for ILLEGAL found"]);
        assert_eq!(program.to_string(), "y");
    }

    #[test]
    fn test_round_trip_of_printed_expressions() {
        let sources = [
            "-a * b",
            "a + b * c + d / e - f",
            "!(a == b) != c < d",
            "1 - (2 - 3)",
            "x / -y * 07",
        ];

        for source in sources {
            let first = parse_ok(source);
            let printed = first.to_string();
            let second = parse_ok(&printed);

            assert_eq!(
                single_expression(&first),
                single_expression(&second),
                "tree changed after reparsing {:?}",
                printed
            );
            assert_eq!(second.to_string(), printed);
        }
    }

    #[test]
    fn test_deep_prefix_nesting_is_rejected() {
        let source = "-".repeat(100_000) + "a";
        let (program, errors) = parse(&source);

        assert!(program.is_empty());
        assert_eq!(errors, [ParseError::NestingTooDeep(MAX_NESTING_DEPTH)]);
    }

    #[test]
    fn test_deep_grouping_is_rejected() {
        let source = "(".repeat(100_000) + "a" + &")".repeat(100_000);
        let (program, errors) = parse(&source);

        assert!(program.is_empty());
        assert_eq!(errors, [ParseError::NestingTooDeep(MAX_NESTING_DEPTH)]);
    }

    #[test]
    fn test_long_infix_chain_is_rejected() {
        let source = String::from("a") + &"+a".repeat(100_000);
        let (program, errors) = parse(&source);

        assert!(program.is_empty());
        assert_eq!(messages(&errors), ["expression nests deeper than 128 levels"]);
    }

    #[test]
    fn test_statement_after_deep_nesting_still_parses() {
        let source = "-".repeat(10_000) + "a; x + 1;";
        let (program, errors) = parse(&source);

        assert_eq!(errors.len(), 1);
        assert_eq!(program.to_string(), "(x + 1)");
    }

    #[test]
    fn test_nesting_below_limit_is_accepted() {
        let input = "-".repeat(100) + "a";
        let program = parse_ok(&input);
        let expected = "(-".repeat(100) + "a" + &")".repeat(100);

        assert_eq!(program.to_string(), expected);

        let chain = String::from("a") + &"+a".repeat(50);
        assert_eq!(parse_ok(&chain).len(), 1);
    }

    #[test]
    fn test_parser_api_and_tracing() {
        let mut parser = Parser::with_options(
            Tokenizer::new("a + -b; let;"),
            ParserOptions { trace: true },
        );
        let program = parser.parse_program();

        assert_eq!(program.to_string(), "(a + (-b))");
        assert_eq!(
            messages(parser.errors()),
            [
                "expected next token to be IDENT, got ; instead",
                "no prefix parse function for ; found",
            ]
        );
    }

    #[test]
    fn test_sexpr_printer() {
        let program = parse_ok("let a = 1; -a * b + c; return a;");

        assert_eq!(
            AstPrinter::print_program(&program),
            "(let a)\n(+ (* (- a) b) c)\n(return)"
        );
    }

    #[test]
    fn test_program_serializes_to_json() {
        let program = parse_ok("-x");
        let json = serde_json::to_value(&program).expect("program serializes");

        let prefix = &json["statements"][0]["Expression"]["expression"]["Prefix"];
        assert_eq!(prefix["operator"], "-");
        assert_eq!(prefix["right"]["Identifier"]["value"], "x");
        assert_eq!(prefix["token"]["kind"], "MINUS");
    }
}
