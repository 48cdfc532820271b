use super::filter::FilterSpec;
use super::types::SqlParam;

pub struct FilterWhere;

impl FilterWhere {
    /// WHERE clause (without the keyword) and its positional parameters
    pub fn generate(spec: &FilterSpec) -> (String, Vec<SqlParam>) {
        let clause = "\"active\" = $1 AND \"name\" ILIKE $2".to_string();
        let params = vec![
            SqlParam::Bool(spec.active),
            SqlParam::Text(spec.name_pattern.clone()),
        ];
        (clause, params)
    }
}

/// Escape LIKE wildcards in user input
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Exact match is the escaped name itself, substring match wraps it in `%`
pub fn like_pattern(name: &str, exact: bool) -> String {
    if exact {
        escape_like(name)
    } else {
        format!("%{}%", escape_like(name))
    }
}

enum Token {
    Literal(char),
    AnyOne,
    AnyMany,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => tokens.push(Token::AnyMany),
            '_' => tokens.push(Token::AnyOne),
            '\\' => match chars.next() {
                Some(escaped) => tokens.extend(escaped.to_lowercase().map(Token::Literal)),
                None => tokens.push(Token::Literal('\\')),
            },
            other => tokens.extend(other.to_lowercase().map(Token::Literal)),
        }
    }
    tokens
}

/// Case-insensitive LIKE, same semantics as Postgres ILIKE with `\` escapes
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();

    // matched[j]: the tokens seen so far match text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;

    for token in &tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            Token::AnyMany => {
                let mut reachable = false;
                for j in 0..=text.len() {
                    reachable |= matched[j];
                    next[j] = reachable;
                }
            }
            Token::AnyOne => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1];
                }
            }
            Token::Literal(c) => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1] && text[j - 1] == *c;
                }
            }
        }
        matched = next;
    }

    matched[text.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_is_case_insensitive() {
        let pattern = like_pattern("na", false);
        assert!(like_matches(&pattern, "na"));
        assert!(like_matches(&pattern, "Banana"));
        assert!(like_matches(&pattern, "NAME 1"));
        assert!(!like_matches(&pattern, "brand"));
    }

    #[test]
    fn exact_match_is_case_insensitive_equality() {
        let pattern = like_pattern("na", true);
        assert!(like_matches(&pattern, "na"));
        assert!(like_matches(&pattern, "NA"));
        assert!(!like_matches(&pattern, "name"));
        assert!(!like_matches(&pattern, "banana"));
    }

    #[test]
    fn empty_substring_matches_everything() {
        let pattern = like_pattern("", false);
        assert!(like_matches(&pattern, ""));
        assert!(like_matches(&pattern, "anything"));
    }

    #[test]
    fn wildcards_in_input_are_literal() {
        let pattern = like_pattern("5%", false);
        assert_eq!(pattern, "%5\\%%");
        assert!(like_matches(&pattern, "Discount 5% off"));
        assert!(!like_matches(&pattern, "Discount 50 off"));

        let pattern = like_pattern("a_b", true);
        assert!(like_matches(&pattern, "A_B"));
        assert!(!like_matches(&pattern, "axb"));
    }

    #[test]
    fn underscore_matches_one_character() {
        assert!(like_matches("p_n", "Pen"));
        assert!(!like_matches("p_n", "Pn"));
    }

    #[test]
    fn unicode_letters_fold() {
        assert!(like_matches(&like_pattern("lápiz", true), "LÁPIZ"));
    }
}
