/// Shell-style tokenizer for copy-pasted cURL command lines.
///
/// Handles line continuations, single- and double-quoted arguments, and
/// backslash escapes. Quote matching is by kind: a double quote inside a
/// single-quoted payload (and vice versa) is literal, so JSON bodies with
/// internal quotes survive intact.
pub fn tokenize(input: &str) -> Vec<String> {
    let joined = join_continuations(input);

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = joined.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                for c in chars.by_ref() {
                    if c == '\'' {
                        break;
                    }
                    current.push(c);
                }
            }
            '"' => {
                in_token = true;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some(esc @ ('"' | '\\' | '$' | '`')) => current.push(esc),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => current.push('\\'),
                        },
                        _ => current.push(c),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            _ => {
                in_token = true;
                current.push(ch);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Remove trailing-backslash line continuations before tokenizing.
fn join_continuations(input: &str) -> String {
    input.replace("\\\r\n", " ").replace("\\\n", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_unquoted_words() {
        assert_eq!(
            tokenize("curl -X POST https://example.com"),
            vec!["curl", "-X", "POST", "https://example.com"]
        );
    }

    #[test]
    fn single_quotes_preserve_double_quotes() {
        let tokens = tokenize(r#"curl -d '{"name":"John"}'"#);
        assert_eq!(tokens, vec!["curl", "-d", r#"{"name":"John"}"#]);
    }

    #[test]
    fn double_quotes_with_escapes() {
        let tokens = tokenize(r#"curl -d "{\"a\": 1}""#);
        assert_eq!(tokens, vec!["curl", "-d", r#"{"a": 1}"#]);
    }

    #[test]
    fn nested_json_with_internal_quotes() {
        let body = r#"{"user":{"name":"J \"Q\" Public","tags":["a","b"]}}"#;
        let tokens = tokenize(&format!("curl -d '{body}'"));
        assert_eq!(tokens[2], body);
    }

    #[test]
    fn line_continuations_joined() {
        let tokens = tokenize("curl \\\n  -H 'A: b' \\\n  https://example.com");
        assert_eq!(tokens, vec!["curl", "-H", "A: b", "https://example.com"]);
    }

    #[test]
    fn quoted_segment_inside_word() {
        assert_eq!(tokenize("curl -XPOST url"), vec!["curl", "-XPOST", "url"]);
        assert_eq!(tokenize("curl -H'A: b'"), vec!["curl", "-HA: b"]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n  ").is_empty());
    }
}
