use super::*;

fn options(case_sensitive: bool, whole_word: bool, use_regex: bool) -> PatternOptions {
    PatternOptions {
        case_sensitive,
        whole_word,
        use_regex,
        ..PatternOptions::default()
    }
}

fn starts(pattern: &CompiledPattern, line: &str) -> Vec<usize> {
    pattern.spans(line).iter().map(|s| s.start).collect()
}

#[test]
fn test_empty_query_is_rejected() {
    assert!(CompiledPattern::compile("", PatternOptions::default()).is_none());
    assert!(CompiledPattern::compile("   \t", PatternOptions::default()).is_none());
}

#[test]
fn test_literal_search() {
    let pattern = CompiledPattern::compile("hello", options(true, false, false)).unwrap();
    assert!(!pattern.is_regex());
    assert_eq!(starts(&pattern, "hello world hello"), vec![0, 12]);
}

#[test]
fn test_case_insensitive() {
    let pattern = CompiledPattern::compile("ABC", options(false, false, false)).unwrap();
    assert_eq!(pattern.spans("xx abc ABC aBc").len(), 3);

    let exact = CompiledPattern::compile("ABC", options(true, false, false)).unwrap();
    assert!(exact.spans("xx abc").is_empty());
}

#[test]
fn test_literal_escapes_metacharacters() {
    let pattern = CompiledPattern::compile("a.b(c)", options(false, false, false)).unwrap();
    assert_eq!(starts(&pattern, "axb(c) a.b(c)"), vec![7]);
}

#[test]
fn test_matches_do_not_overlap() {
    let literal = CompiledPattern::compile("aa", options(true, false, false)).unwrap();
    assert_eq!(starts(&literal, "aaaa"), vec![0, 2]);

    let insensitive = CompiledPattern::compile("aa", options(false, false, false)).unwrap();
    assert_eq!(starts(&insensitive, "aaaa"), vec![0, 2]);
}

#[test]
fn test_whole_word() {
    let pattern = CompiledPattern::compile("cat", options(false, true, false)).unwrap();
    assert!(pattern.spans("category").is_empty());
    assert_eq!(
        pattern.spans("the cat sat"),
        vec![Span { start: 4, len: 3 }]
    );
}

#[test]
fn test_regex_search() {
    let pattern = CompiledPattern::compile(r"\w+\d+", options(true, false, true)).unwrap();
    assert!(pattern.is_regex());
    assert!(pattern.fell_back().is_none());
    assert_eq!(pattern.spans("hello123 world456").len(), 2);
}

#[test]
fn test_invalid_regex_falls_back_to_literal() {
    let pattern = CompiledPattern::compile("(unclosed", options(false, false, true)).unwrap();
    assert!(pattern.fell_back().is_some());
    assert_eq!(
        pattern.spans("call(unclosed, x)"),
        vec![Span { start: 4, len: 9 }]
    );
    assert!(pattern.spans("unclosed").is_empty());
}

#[test]
fn test_empty_regex_matches_are_skipped() {
    let pattern = CompiledPattern::compile("a*", options(true, false, true)).unwrap();
    let spans = pattern.spans("baab");
    assert_eq!(spans, vec![Span { start: 1, len: 2 }]);
    assert!(spans.iter().all(|s| s.len > 0));
}

#[test]
fn test_regex_size_limit_falls_back() {
    let tight = options(false, false, true).with_size_limit(16);
    let pattern = CompiledPattern::compile(r"\w{50}", tight).unwrap();
    assert!(pattern.fell_back().is_some());
    assert_eq!(starts(&pattern, r"x \w{50}"), vec![2]);
}

#[test]
fn test_options_from_filters() {
    let filters = SearchFilters {
        case_sensitive: true,
        use_regex: true,
        ..SearchFilters::default()
    };
    let opts = PatternOptions::from_filters(&filters);
    assert!(opts.case_sensitive);
    assert!(opts.use_regex);
    assert!(!opts.whole_word);
    assert_eq!(opts.size_limit, DEFAULT_REGEX_SIZE_LIMIT);
}
