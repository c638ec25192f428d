//! End-to-end parsing of whole documents with both strategies
//!
//! Every test runs once per strategy; the two must agree on trees and errors.

use rstest::rstest;
use stackjson::{ErrorKind, Parser, ParserConfig, Position, Source, Strategy, Token};
use std::io::Cursor;

const DONUT: &str = concat!(
    "{\n",
    "\t\"id\": \"0001\",\n",
    "\t\"type\": \"donut\",\n",
    "\t\"name\": \"Cake\",\n",
    "\t\"image\":\n",
    "\t\t{\n",
    "\t\t\t\"url\": \"images/0001.jpg\",\n",
    "\t\t\t\"width\": 200,\n",
    "\t\t\t\"height\": 200\n",
    "\t\t},\n",
    "\t\"thumbnail\":\n",
    "\t\t{\n",
    "\t\t\t\"url\": \"images/thumbnails/0001.jpg\",\n",
    "\t\t\t\"width\": 32,\n",
    "\t\t\t\"height\": 32\n",
    "\t\t}\n",
    "}",
);

const DONUT_COMPACT: &str = concat!(
    "{ \"id\": \"0001\", \"type\": \"donut\", \"name\": \"Cake\", ",
    "\"image\": { \"url\": \"images/0001.jpg\", \"width\": 200, \"height\": 200 }, ",
    "\"thumbnail\": { \"url\": \"images/thumbnails/0001.jpg\", \"width\": 32, \"height\": 32 } }",
);

const FSTAB: &str = r#"{
    "/": {
        "storage": {
            "type": "disk",
            "device": "/dev/sda1"
        },
        "fstype": "btrfs",
        "readonly": true
    },
    "/var": {
        "storage": {
            "type": "disk",
            "label": "8f3ba6f4-5c70-46ec-83af-0d5434953e5f"
        },
        "fstype": "ext4",
        "options": [ "nosuid" ]
    },
    "/tmp": {
        "storage": {
            "type": "tmpfs",
            "sizeInMB": 64
        }
    },
    "/var/www": {
        "storage": {
            "type": "nfs",
            "server": "my.nfs.server",
            "remotePath": "/exports/mypath"
        }
    }
}"#;

const FSTAB_COMPACT: &str = concat!(
    "{ \"/\": { \"storage\": { \"type\": \"disk\", \"device\": \"/dev/sda1\" },",
    " \"fstype\": \"btrfs\", \"readonly\": true }, \"/var\": { \"storage\": { \"type\": ",
    "\"disk\", \"label\": \"8f3ba6f4-5c70-46ec-83af-0d5434953e5f\" }, \"fstype\": \"ext4\", ",
    "\"options\": [ \"nosuid\" ] }, \"/tmp\": { \"storage\": ",
    "{ \"type\": \"tmpfs\", \"sizeInMB\": 64 } }, \"/var/www\": ",
    "{ \"storage\": { \"type\": \"nfs\", \"server\": \"my.nfs.server\", ",
    "\"remotePath\": \"/exports/mypath\" } } }",
);

fn parser(strategy: Strategy) -> Parser {
    Parser::new(ParserConfig {
        strategy,
        queue_capacity: 4,
    })
}

fn compact(roots: &[Token]) -> String {
    roots.iter().map(Token::to_string).collect()
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_donut_document(strategy: Strategy) {
    let roots = parser(strategy).parse(DONUT).unwrap();
    assert_eq!(compact(&roots), DONUT_COMPACT);

    let image = roots[0].get("image").unwrap();
    assert_eq!(image.get("width").and_then(Token::as_number), Some("200"));
    assert_eq!(roots[0].get("name").and_then(Token::as_str), Some("Cake"));
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_fstab_document(strategy: Strategy) {
    let roots = parser(strategy).parse(FSTAB).unwrap();
    assert_eq!(compact(&roots), FSTAB_COMPACT);

    let root = &roots[0];
    assert_eq!(root.elements().map(<[_]>::len), Some(4));
    let readonly = root.get("/").and_then(|mount| mount.get("readonly"));
    assert_eq!(readonly.and_then(Token::as_bool), Some(true));
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_compact_form_parses_back(strategy: Strategy) {
    let parser = parser(strategy);
    let first = parser.parse(FSTAB).unwrap();
    let again = parser.parse(compact(&first)).unwrap();
    assert_eq!(first, again);
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_literals_are_preserved(strategy: Strategy) {
    let roots = parser(strategy)
        .parse(r#"[0.456245355434375E-23, -0, 1e5, "a\"b\\", "\u00e9"]"#)
        .unwrap();
    assert_eq!(
        roots[0].to_string(),
        r#"[ 0.456245355434375E-23, -0, 1e5, "a\"b\\", "\u00e9" ]"#
    );
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_multiple_roots(strategy: Strategy) {
    let roots = parser(strategy).parse("{}\n[]\n{\"a\": [1]}").unwrap();
    assert_eq!(roots.len(), 3);
    assert_eq!(compact(&roots), "{ }[ ]{ \"a\": [ 1 ] }");
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_empty_input(strategy: Strategy) {
    assert!(parser(strategy).parse("").unwrap().is_empty());
    assert!(parser(strategy).parse(" \r\n\t").unwrap().is_empty());
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_reader_source(strategy: Strategy) {
    let bytes = DONUT.as_bytes().to_vec();
    let roots = parser(strategy)
        .parse(Source::reader(Cursor::new(bytes)))
        .unwrap();
    assert_eq!(compact(&roots), DONUT_COMPACT);
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_char_source(strategy: Strategy) {
    let roots = parser(strategy)
        .parse(Source::chars(r#"{"k": [true, false]}"#.chars().collect::<Vec<_>>()))
        .unwrap();
    assert_eq!(compact(&roots), r#"{ "k": [ true, false ] }"#);
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_syntax_errors(strategy: Strategy) {
    let parser = parser(strategy);
    for text in [
        r#"{"a":}"#,
        r#"{"a" "b"}"#,
        "[1,2,]",
        "[,1]",
        r#"{"a":1,}"#,
        "[1]]",
        "{1:2}",
        "42",
        r#"{"a":[1,2}"#,
        "{",
    ] {
        let err = parser.parse(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{}: {}", text, err);
    }
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_token_errors(strategy: Strategy) {
    let parser = parser(strategy);

    let err = parser.parse("[1, nul]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);

    let err = parser.parse("[1, nul ]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.position(), Some(Position::new(1, 5)));

    for text in ["[1.5e]", "[1.5e ]", "[1.5e"] {
        let err = parser.parse(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical, "{}", text);
    }

    let err = parser.parse("[True]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);

    let err = parser.parse("[\"unterminated]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);

    let err = parser.parse("\"abc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_error_position_on_later_line(strategy: Strategy) {
    let err = parser(strategy)
        .parse("{\n  \"a\": 1,\n  \"b\": ]\n}")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.position(), Some(Position::new(3, 8)));
}

#[rstest(strategy => [Strategy::Synchronous, Strategy::Concurrent])]
fn test_invalid_utf8(strategy: Strategy) {
    let err = parser(strategy)
        .parse(Source::reader(Cursor::new(vec![b'[', b'"', 0xC3, b'"', b']'])))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_strategies_agree_on_errors() {
    for text in [r#"{"a":}"#, "[1 2]", "[1, 2", "[01x]", "{\"a\"\n:\n}", "]"] {
        let sync = parser(Strategy::Synchronous).parse(text).unwrap_err();
        let concurrent = parser(Strategy::Concurrent).parse(text).unwrap_err();
        assert_eq!(sync, concurrent, "{}", text);
    }
}

#[test]
fn test_deeply_nested() {
    let depth = 2_000;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let sync = parser(Strategy::Synchronous).parse(text.as_str()).unwrap();
    let concurrent = parser(Strategy::Concurrent).parse(text.as_str()).unwrap();
    assert_eq!(sync.len(), 1);
    assert!(sync == concurrent);
}

#[test]
fn test_free_function_uses_defaults() {
    let roots = stackjson::parse(r#"{"id":"0001","n":1}"#).unwrap();
    assert_eq!(roots[0].to_string(), r#"{ "id": "0001", "n": 1 }"#);
}
