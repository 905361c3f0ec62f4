use ltscript::interpreter::ops::apply_binary;
use ltscript::memory::value::Value;
use ltscript::parser::ast::BinOp;
use ltscript::parser::lexer::{tokenize, TokenKind};
use ltscript::parser::parse::parse;
use ltscript::{compile, run_source};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "true", "false", "print", "let", "pub", "return", "fn", "if", "and", "or", "not",
];

fn token_kind() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        (0.0f64..1.0e9).prop_map(TokenKind::Number),
        (0u32..100_000).prop_map(|n| TokenKind::Number(n as f64)),
        "[ -~\n\t]{0,12}".prop_map(TokenKind::Str),
        "[a-z_][a-z0-9_]{0,8}"
            .prop_filter("keywords are not identifiers", |s| !KEYWORDS.contains(&s.as_str()))
            .prop_map(TokenKind::Ident),
        prop::sample::select(vec![
            TokenKind::True,
            TokenKind::Print,
            TokenKind::Let,
            TokenKind::Fn,
            TokenKind::Not,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::SlashSlash,
            TokenKind::Caret,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::LParen,
            TokenKind::RBrace,
        ]),
    ]
}

proptest! {
    #[test]
    fn lexing_serialised_tokens_gives_them_back(kinds in prop::collection::vec(token_kind(), 0..24)) {
        let source = kinds.iter().map(TokenKind::to_source).collect::<Vec<_>>().join(" ");
        let tokens = tokenize(&source, "prop").unwrap();

        // Drop the synthetic outer braces and the end marker
        let lexed: Vec<TokenKind> = tokens[1..tokens.len() - 2].iter().map(|t| t.kind.clone()).collect();
        prop_assert_eq!(lexed, kinds);
    }

    #[test]
    fn parsing_is_deterministic(
        name in "[a-z][a-z0-9]{0,6}".prop_filter("keywords are not identifiers", |s| !KEYWORDS.contains(&s.as_str())),
        a in 0u32..1000,
        b in 0u32..1000,
    ) {
        let source = format!(
            "let {name} = fn(x) {{ if x > {a} {{ return x; }}; x * {b} }}; print {name}({a});"
        );
        let first = parse(tokenize(&source, "prop").unwrap()).unwrap();
        let second = compile(&source, "prop").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn integer_arithmetic_matches_host(a in 0i64..10_000, b in 1i64..10_000) {
        let source = format!("print {a} * {b} - {a}; print {a} // {b}; print {a} % {b};");
        let outcome = run_source(&source, "prop").unwrap();

        prop_assert_eq!(
            outcome.output,
            vec![(a * b - a).to_string(), (a / b).to_string(), (a % b).to_string()]
        );
    }

    #[test]
    fn modulo_takes_the_sign_of_the_divisor(a in -1000i32..1000, b in -1000i32..1000) {
        prop_assume!(b != 0);
        let result = apply_binary(BinOp::Mod, &Value::Number(a as f64), &Value::Number(b as f64)).unwrap();
        let r = result.as_number().unwrap();

        prop_assert!(r.abs() < (b as f64).abs());
        prop_assert!(r == 0.0 || (r < 0.0) == (b < 0));
    }
}
