//! Line classification for decksh scripts.
//!
//! Each source line is classified exactly once into a `Statement` variant;
//! the interpreter dispatches on the variant instead of re-testing string
//! prefixes. Classification order matters and is part of the language:
//! SAY, then ADDRESS, then assignment, then IF, then DO. A line that fits
//! none of the shapes is `Unknown` and interprets as a no-op.

use regex::Regex;

/// One classified script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Empty after trimming.
    Blank,
    /// Line comment (`--`).
    Comment,
    /// Opening of a block comment (`/*`); the interpreter scans forward
    /// for the closing marker.
    BlockCommentStart,
    /// Output statement; carries the expression text after the keyword.
    Say(String),
    /// ADDRESS directive. `command` is the quoted command text, or None
    /// when the line did not match the exact quoted form (a no-op).
    Address { command: Option<String> },
    /// `name = expression`.
    Assign { name: String, expr: String },
    /// `IF <condition> THEN`.
    If { condition: String },
    /// `DO var = from TO to`.
    Do { var: String, from: i64, to: i64 },
    /// Block terminator; a no-op during forward execution.
    End,
    /// Anything else; silently skipped.
    Unknown,
}

/// Classifies lines into statements. Holds the compiled line patterns.
pub struct Classifier {
    assign: Regex,
    if_then: Regex,
    do_range: Regex,
    address: Regex,
}

impl Classifier {
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            assign: Regex::new(r"^(\w+)\s*=\s*(.+)$").expect("assign pattern"),
            if_then: Regex::new(r"(?i)IF\s+(.+?)\s+THEN").expect("if pattern"),
            do_range: Regex::new(r"(?i)DO\s+(\w+)\s*=\s*(\d+)\s+TO\s+(\d+)")
                .expect("do pattern"),
            // The command text must be double-quoted and the keyword must be
            // literal uppercase here; lowercased directives pass the prefix
            // test below but fail extraction and become no-ops.
            address: Regex::new(r#"ADDRESS SLIDES\s+"([^"]+)""#).expect("address pattern"),
        }
    }

    /// Classify one raw source line.
    pub fn classify(&self, line: &str) -> Statement {
        let line = line.trim();
        if line.is_empty() {
            return Statement::Blank;
        }
        if line.starts_with("--") {
            return Statement::Comment;
        }
        if line.starts_with("/*") {
            return Statement::BlockCommentStart;
        }

        // Keyword tests are bare prefixes, not word boundaries: `SAYX` is
        // a SAY statement whose expression is `X`.
        if has_keyword_prefix(line, "SAY") {
            return Statement::Say(line[3..].trim().to_string());
        }

        if has_keyword_prefix(line, "ADDRESS SLIDES") {
            let command = self
                .address
                .captures(line)
                .map(|c| c[1].to_string());
            return Statement::Address { command };
        }

        if let Some(c) = self.assign.captures(line) {
            return Statement::Assign {
                name: c[1].to_string(),
                expr: c[2].to_string(),
            };
        }

        if has_keyword_prefix(line, "IF") {
            if let Some(c) = self.if_then.captures(line) {
                return Statement::If {
                    condition: c[1].to_string(),
                };
            }
            return Statement::Unknown;
        }

        if has_keyword_prefix(line, "DO") {
            if let Some(c) = self.do_range.captures(line) {
                if let (Ok(from), Ok(to)) = (c[2].parse::<i64>(), c[3].parse::<i64>()) {
                    return Statement::Do {
                        var: c[1].to_string(),
                        from,
                        to,
                    };
                }
            }
            return Statement::Unknown;
        }

        if has_keyword_prefix(line, "END") {
            return Statement::End;
        }

        Statement::Unknown
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII case-insensitive prefix test on a trimmed line.
pub fn has_keyword_prefix(line: &str, keyword: &str) -> bool {
    line.len() >= keyword.len()
        && line.as_bytes()[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Statement {
        Classifier::new().classify(line)
    }

    #[test]
    fn blank_and_comments() {
        assert_eq!(classify(""), Statement::Blank);
        assert_eq!(classify("   "), Statement::Blank);
        assert_eq!(classify("-- a remark"), Statement::Comment);
        assert_eq!(classify("/* start"), Statement::BlockCommentStart);
    }

    #[test]
    fn say_keeps_expression() {
        assert_eq!(classify("SAY \"hi\""), Statement::Say("\"hi\"".into()));
        assert_eq!(classify("say  x"), Statement::Say("x".into()));
    }

    #[test]
    fn say_is_a_bare_prefix() {
        // No word-boundary check: the remainder after the three keyword
        // characters is the expression.
        assert_eq!(classify("SAYX"), Statement::Say("X".into()));
    }

    #[test]
    fn address_with_quoted_command() {
        assert_eq!(
            classify(r#"ADDRESS SLIDES "new-slide""#),
            Statement::Address {
                command: Some("new-slide".into())
            }
        );
    }

    #[test]
    fn address_without_quotes_is_a_noop() {
        assert_eq!(
            classify("ADDRESS SLIDES new-slide"),
            Statement::Address { command: None }
        );
    }

    #[test]
    fn lowercase_address_fails_extraction() {
        // The prefix test is case-insensitive but the extraction pattern
        // is not; a lowercased directive interprets as a no-op.
        assert_eq!(
            classify(r#"address slides "new-slide""#),
            Statement::Address { command: None }
        );
    }

    #[test]
    fn assignment() {
        assert_eq!(
            classify("X = 5"),
            Statement::Assign {
                name: "X".into(),
                expr: "5".into()
            }
        );
        assert_eq!(
            classify("count=COUNT || 1"),
            Statement::Assign {
                name: "count".into(),
                expr: "COUNT || 1".into()
            }
        );
    }

    #[test]
    fn assignment_wins_over_if_and_do() {
        // Classification order: a line shaped like both an assignment and
        // a keyword statement is an assignment.
        assert_eq!(
            classify("IFX = 1"),
            Statement::Assign {
                name: "IFX".into(),
                expr: "1".into()
            }
        );
    }

    #[test]
    fn if_then() {
        assert_eq!(
            classify("IF RC = 0 THEN"),
            Statement::If {
                condition: "RC = 0".into()
            }
        );
        assert_eq!(
            classify("if X then"),
            Statement::If {
                condition: "X".into()
            }
        );
    }

    #[test]
    fn if_without_then_is_unknown() {
        assert_eq!(classify("IF X"), Statement::Unknown);
    }

    #[test]
    fn do_range() {
        assert_eq!(
            classify("DO I = 1 TO 3"),
            Statement::Do {
                var: "I".into(),
                from: 1,
                to: 3
            }
        );
        assert_eq!(
            classify("do n=2 to 5"),
            Statement::Do {
                var: "n".into(),
                from: 2,
                to: 5
            }
        );
    }

    #[test]
    fn do_without_range_is_unknown() {
        assert_eq!(classify("DO FOREVER"), Statement::Unknown);
    }

    #[test]
    fn end_marker() {
        assert_eq!(classify("END"), Statement::End);
        assert_eq!(classify("end"), Statement::End);
    }

    #[test]
    fn unrecognized_is_unknown() {
        assert_eq!(classify("EXIT"), Statement::Unknown);
        assert_eq!(classify("CALL foo"), Statement::Unknown);
    }
}
