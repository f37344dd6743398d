use bigdecimal::BigDecimal;
use clicalc::{
    command::{Command, VERSION},
    config::{Config, ConfigError},
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Context,
        lexer::Lexer,
        parser::core::Parser,
        store::VariableStore,
        token::{Token, TokenKind},
        tree::{SyntaxTree, TreeError},
        value::{
            core::Number,
            precision::{MAX_PRECISION, Precision},
            render::parse_float,
        },
    },
};
use num_bigint::BigInt;
use tracing::Level;

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).map(|t| t.kind).collect()
}

fn int(text: &str) -> Token {
    Token::new(TokenKind::Integer, text)
}

#[test]
fn lexer_classifies_tokens() {
    assert_eq!(kinds("1 2.5 3."), [TokenKind::Integer, TokenKind::Float, TokenKind::Float]);
    assert_eq!(kinds("pi e rand"), [TokenKind::Constant; 3]);
    assert_eq!(kinds("sqrt fact log10"), [TokenKind::Function; 3]);
    assert_eq!(kinds("make makes"), [TokenKind::Assignment, TokenKind::String]);
    assert_eq!(kinds("a & b << c ~ d"),
               [TokenKind::String,
                TokenKind::BinaryOp,
                TokenKind::String,
                TokenKind::LogicalOp,
                TokenKind::String,
                TokenKind::UnaryOp,
                TokenKind::String]);
    assert_eq!(kinds("+-*/%^"), [TokenKind::Op; 6]);
    assert_eq!(kinds("1 < 2"), [TokenKind::Integer, TokenKind::Undefined, TokenKind::Integer]);
}

#[test]
fn lexer_positions_and_end() {
    let mut lexer = Lexer::new("12 + 3");
    assert_eq!(lexer.kind(), TokenKind::Begin);

    assert_eq!(lexer.advance().text, "12");
    assert_eq!(lexer.position(), 3);
    assert_eq!(lexer.advance().kind, TokenKind::Op);
    assert_eq!(lexer.position(), 5);
    lexer.advance();
    assert_eq!(lexer.text(), "3");
    assert_eq!(lexer.position(), 7);

    assert_eq!(lexer.advance().kind, TokenKind::End);
    assert!(!lexer.has_next());
    assert_eq!(lexer.position(), 7);
    assert_eq!(lexer.advance().kind, TokenKind::End);
}

#[test]
fn token_display() {
    assert_eq!(int("7").to_string(), "[INTEGER]: 7");
    assert_eq!(Token::expression().to_string(), "[EXPRESSION]");
}

#[test]
fn tree_cursor_errors() {
    let mut tree = SyntaxTree::new();
    assert_eq!(tree.advance_back(), Err(TreeError::NoCurrent));
    assert_eq!(tree.pop_cache(), Err(TreeError::EmptyCache));

    tree.add_child(Token::expression());
    tree.add_child(int("1"));
    assert_eq!(tree.advance_back(), Err(TreeError::AtRoot));
    assert_eq!(tree.advance_forward(3), Err(TreeError::ChildOutOfRange { index: 3, len: 1 }));
    assert_eq!(tree.reduce(42, int("0")), Err(TreeError::UnknownNode(42)));
    assert!(!tree.advance_root());

    tree.advance_forward(0).unwrap();
    assert_eq!(tree.advance_last(), Err(TreeError::ChildOutOfRange { index: 0, len: 0 }));
    assert!(tree.advance_root());
}

#[test]
fn tree_editing() {
    let mut tree = SyntaxTree::new();
    let root = tree.add_child(Token::expression());
    tree.add_child(int("1"));
    tree.add_child(Token::new(TokenKind::Op, "+"));
    tree.add_child(int("2"));
    assert_eq!(tree.size(), Ok(3));
    assert_eq!(tree.child_contents(1).unwrap().text, "+");

    tree.remove_child(1).unwrap();
    assert_eq!(tree.size(), Ok(2));
    assert_eq!(tree.child_contents(1).unwrap().text, "2");
    assert_eq!(tree.remove_child(5), Err(TreeError::ChildOutOfRange { index: 5, len: 2 }));

    tree.advance_last().unwrap();
    assert_eq!(tree.negate(), Ok(true));
    assert_eq!(tree.contents().unwrap().text, "-2");
    tree.set_contents(&Token::new(TokenKind::Op, "*")).unwrap();
    assert_eq!(tree.negate(), Ok(false));

    tree.advance_root();
    tree.remove_children().unwrap();
    assert_eq!(tree.size(), Ok(0));

    tree.add_child(int("9"));
    tree.reduce(root, Token::new(TokenKind::Float, "1.5")).unwrap();
    assert_eq!(tree.kind(), Ok(TokenKind::Float));
    assert_eq!(tree.size(), Ok(0));
}

#[test]
fn parser_builds_sibling_operators() {
    let trees = Parser::new("2 - 3 + 4").parse().unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].to_string(),
               "[EXPRESSION] (2)\n\
                [INTEGER]: 2 (0)\n\
                [OPERATOR]: - (1)\n\
                [EXPRESSION] (2)\n\
                [INTEGER]: 3 (0)\n\
                [OPERATOR]: + (1)\n\
                [EXPRESSION] (1)\n\
                [INTEGER]: 4 (0)\n");
}

#[test]
fn parser_builds_applications() {
    let trees = Parser::new("sqrt ~x").parse().unwrap();
    assert_eq!(trees[0].to_string(),
               "[EXPRESSION] (1)\n\
                [FUNCTION]: sqrt (1)\n\
                [EXPRESSION] (1)\n\
                [UNARY OPERATOR]: ~ (1)\n\
                [EXPRESSION] (1)\n\
                [STRING]: x (0)\n");
}

#[test]
fn parser_reports_positions() {
    assert_eq!(Parser::new("(1 + 2").parse().unwrap_err(),
               ParseError::ExpectingCloseParen { position: 7 });
    assert_eq!(Parser::new("make 1").parse().unwrap_err(),
               ParseError::ExpectingStringIdentifier { position: 7 });
    assert_eq!(Parser::new("2 *").parse().unwrap_err(),
               ParseError::ExpectingIdentifier { position: 4 });
    assert!(Parser::new("").parse().unwrap().is_empty());
}

#[test]
fn evaluation_folds_the_tree() {
    let mut ctx = Context::new();
    let mut trees = Parser::new("1 + 2 * 3").parse().unwrap();
    let tree = &mut trees[0];

    assert_eq!(ctx.eval_statement(tree), Ok(Some("7".to_owned())));
    assert!(tree.at_root());
    assert_eq!(tree.to_string(), "[INTEGER]: 7 (0)\n");
}

#[test]
fn store_holds_numbers_only() {
    let mut store = VariableStore::new();
    store.set("y", Token::new(TokenKind::Float, "0.5")).unwrap();
    store.set("x", int("3")).unwrap();
    assert_eq!(store.set("z", Token::new(TokenKind::String, "w")),
               Err(RuntimeError::InvalidOperand));

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("x"), Some(&int("3")));
    assert_eq!(store.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(store.render(), "x --> 3\ny --> 0.5\n");

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.render(), "");
}

#[test]
fn numbers_from_tokens() {
    let n = Number::from_token(&int("-0012")).unwrap();
    assert_eq!(n, Number::Integer(BigInt::from(-12)));
    assert_eq!(n.into_token(), int("-12"));

    let f = Number::from_token(&Token::new(TokenKind::Float, "2.50")).unwrap();
    assert_eq!(f.to_string(), "2.5");
    assert_eq!(f.kind(), TokenKind::Float);

    assert_eq!(Number::from_token(&Token::new(TokenKind::Float, "abc")),
               Err(RuntimeError::InvalidOperand));
    assert_eq!(Number::from_token(&Token::new(TokenKind::Op, "+")),
               Err(RuntimeError::InvalidOperand));
}

#[test]
fn precision_rounds_half_to_even() {
    let p = Precision::new(3);
    let round = |s: &str| p.round(&parse_float(s).unwrap());

    assert_eq!(round("2.345"), parse_float("2.34").unwrap());
    assert_eq!(round("2.355"), parse_float("2.36").unwrap());
    assert_eq!(round("-2.3451"), parse_float("-2.35").unwrap());
    assert_eq!(round("999.6"), BigDecimal::from(1000));

    assert_eq!(Precision::new(0).digits(), 1);
    assert_eq!(Precision::new(5000).digits(), MAX_PRECISION);
}

#[test]
fn commands() {
    assert_eq!(Command::parse("help"), Some(Command::Help));
    assert_eq!(Command::parse("exit"), Some(Command::Exit));
    assert_eq!(Command::parse("x + 1"), None);
    assert_eq!(Command::parse("helpme"), None);

    let mut ctx = Context::new();
    clicalc::evaluate("make b 2 make a 1.5", &mut ctx).unwrap();
    assert_eq!(Command::State.execute(&mut ctx), "a --> 1.5\nb --> 2\n");
    assert!(Command::About.execute(&mut ctx).starts_with(VERSION));
    assert!(Command::Help.execute(&mut ctx).contains("sqrt"));

    Command::Reset.execute(&mut ctx);
    assert!(ctx.store().is_empty());
    assert_eq!(Command::State.execute(&mut ctx), "");
}

#[test]
fn default_context_uses_default_config() {
    let ctx = Context::default();
    assert_eq!(ctx.precision(), Precision::default());
    assert_eq!(ctx.precision().digits(), 32);
    assert!(ctx.store().is_empty());
}

#[test]
fn config_validation() {
    assert_eq!(Config::default().validate(), Ok(()));
    assert_eq!(Config { precision: MAX_PRECISION + 1,
                        ..Config::default() }.validate(),
               Err(ConfigError::Precision(MAX_PRECISION + 1)));

    assert_eq!(Config::default().log_level(), Level::WARN);
    assert_eq!(Config { verbose: 5,
                        ..Config::default() }.log_level(),
               Level::TRACE);
}
