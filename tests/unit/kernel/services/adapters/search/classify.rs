use super::*;

fn span_of(line: &str, needle: &str) -> Span {
    Span {
        start: line.find(needle).expect("needle in line"),
        len: needle.len(),
    }
}

fn kind_of(line: &str, needle: &str) -> MatchKind {
    classify(line, span_of(line, needle))
}

#[test]
fn test_comment_prefixes() {
    assert_eq!(kind_of("// find me", "find"), MatchKind::Comment);
    assert_eq!(kind_of("   /* find */", "find"), MatchKind::Comment);
    assert_eq!(kind_of(" * find", "find"), MatchKind::Comment);
    assert_eq!(kind_of("# find", "find"), MatchKind::Comment);
}

#[test]
fn test_block_comment_opener_anywhere() {
    assert_eq!(kind_of("let x = 1; /* find */", "find"), MatchKind::Comment);
    // 行尾注释 `//` 不在行首时不算
    assert_eq!(kind_of("x = 1; // find", "find"), MatchKind::Code);
}

#[test]
fn test_inside_quotes() {
    assert_eq!(kind_of(r#"log("find me")"#, "find"), MatchKind::String);
    assert_eq!(kind_of("log('find')", "find"), MatchKind::String);
    assert_eq!(kind_of("log(`find`)", "find"), MatchKind::String);
}

#[test]
fn test_single_quote_does_not_make_string() {
    assert_eq!(kind_of(r#"x = "abc; find"#, "find"), MatchKind::Code);
}

#[test]
fn test_only_first_quote_is_considered() {
    // 第一个引号在匹配之前、匹配之后还有引号，即使匹配其实在两个字符串之间
    assert_eq!(kind_of(r#"f("a", find, "b")"#, "find"), MatchKind::String);
    // 匹配在第一个引号之前
    assert_eq!(kind_of(r#"find("a")"#, "find"), MatchKind::Code);
}

#[test]
fn test_quote_at_match_start_is_not_string() {
    let line = r#"x = "a" + "b""#;
    let span = Span { start: 10, len: 3 };
    assert_eq!(classify(line, span), MatchKind::Code);
}

#[test]
fn test_keyword_before_match() {
    assert_eq!(kind_of("const x = 1;", "const"), MatchKind::Keyword);
    assert_eq!(kind_of("export function find() {}", "find"), MatchKind::Keyword);
    assert_eq!(kind_of("type Alias = number", "Alias"), MatchKind::Keyword);
}

#[test]
fn test_keyword_after_match_is_ignored() {
    assert_eq!(kind_of("find(); const y = 2;", "find"), MatchKind::Code);
}

#[test]
fn test_keyword_needs_word_boundary() {
    assert_eq!(kind_of("constant = find", "find"), MatchKind::Code);
    assert_eq!(kind_of("letter = find", "find"), MatchKind::Code);
}

#[test]
fn test_comment_wins_over_string() {
    assert_eq!(kind_of(r#"// "find" "#, "find"), MatchKind::Comment);
}

#[test]
fn test_is_comment_line() {
    assert!(is_comment_line("  // x"));
    assert!(is_comment_line("#!/bin/sh"));
    assert!(!is_comment_line("x /* y */"));
    assert!(!is_comment_line(""));
}
