//! SQL query parser.
//!
//! Lexing is done by the `sqlparser` tokenizer; the grammar is a small
//! recursive-descent pass over the resulting tokens:
//!
//! ```text
//! query       := SELECT select_list FROM identifier [ WHERE condition ] [;]
//! select_list := * | COUNT(*) | COUNT(identifier) | identifier {, identifier}
//! condition   := identifier operator value
//! identifier  := bare word of letters, digits and '_', not starting with a digit
//! operator    := = | != | <> | >= | <= | > | <
//! value       := 'text' | "text" | [+|-] number
//! ```

use crate::query::ast::{CountTarget, FilterCondition, ParsedQuery, Projection};
use crate::types::{Literal, Operator, SyntaxError};
use sqlparser::dialect::GenericDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer, Word};
use tracing::debug;

/// Parse a query string into a `ParsedQuery`.
///
/// Shorthand for [`QueryParser::parse`].
pub fn parse(sql: &str) -> Result<ParsedQuery, SyntaxError> {
    QueryParser::parse(sql)
}

/// SQL query parser over a pre-tokenized statement.
pub struct QueryParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl QueryParser {
    /// Parse SQL query string.
    ///
    /// # Arguments
    ///
    /// * `sql` - SQL query string
    ///
    /// # Returns
    ///
    /// Parsed `ParsedQuery`
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the text does not match the supported grammar
    pub fn parse(sql: &str) -> Result<ParsedQuery, SyntaxError> {
        let mut parser = Self::new(sql)?;
        let query = parser.parse_query()?;
        if let Some(token) = parser.peek() {
            return Err(SyntaxError::Trailing(token.to_string()));
        }
        debug!(query = %query, "parsed query");
        Ok(query)
    }

    /// Validate query syntax.
    ///
    /// # Returns
    ///
    /// `true` if syntax is valid
    pub fn validate(sql: &str) -> bool {
        Self::parse(sql).is_ok()
    }

    /// Tokenize the input, dropping whitespace and one trailing `;`.
    fn new(sql: &str) -> Result<Self, SyntaxError> {
        let dialect = GenericDialect {};
        let mut tokens: Vec<Token> = Tokenizer::new(&dialect, sql)
            .tokenize()
            .map_err(|e| SyntaxError::Tokenize(e.to_string()))?
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_) | Token::EOF))
            .collect();

        if tokens.last() == Some(&Token::SemiColon) {
            tokens.pop();
        }
        if tokens.is_empty() {
            return Err(SyntaxError::Empty);
        }

        Ok(Self { tokens, pos: 0 })
    }

    fn parse_query(&mut self) -> Result<ParsedQuery, SyntaxError> {
        self.expect_keyword(Keyword::SELECT, "SELECT")?;
        let projection = self.parse_select_list()?;
        self.expect_keyword(Keyword::FROM, "FROM")?;
        let table_name = self.parse_identifier("table name after FROM")?;

        let filter = if self.next_if_keyword(Keyword::WHERE) {
            Some(self.parse_condition()?)
        } else {
            None
        };

        Ok(ParsedQuery {
            table_name,
            projection,
            filter,
        })
    }

    fn parse_select_list(&mut self) -> Result<Projection, SyntaxError> {
        let projection = if self.next_is(&Token::Mul) {
            Projection::Wildcard
        } else if self.at_count() {
            Projection::Count(self.parse_count()?)
        } else {
            return self.parse_column_list().map(Projection::Columns);
        };

        if self.peek() == Some(&Token::Comma) {
            let what = match projection {
                Projection::Count(_) => "COUNT",
                _ => "'*'",
            };
            return Err(SyntaxError::select_list(format!(
                "{} cannot be combined with other columns",
                what
            )));
        }
        Ok(projection)
    }

    fn parse_column_list(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut columns = Vec::new();
        loop {
            if self.peek().map_or(true, |t| is_keyword(t, Keyword::FROM)) {
                return Err(SyntaxError::select_list(if columns.is_empty() {
                    "no columns specified"
                } else {
                    "empty column name after ','"
                }));
            }

            match self.peek() {
                Some(Token::Comma) => return Err(SyntaxError::select_list("empty column name")),
                Some(Token::Mul) => {
                    return Err(SyntaxError::select_list(
                        "'*' cannot be combined with other columns",
                    ))
                }
                _ if self.at_count() => {
                    return Err(SyntaxError::select_list(
                        "COUNT cannot be combined with other columns",
                    ))
                }
                _ => columns.push(self.parse_identifier("column name")?),
            }

            if !self.next_is(&Token::Comma) {
                return Ok(columns);
            }
        }
    }

    /// `COUNT ( * )` or `COUNT ( identifier )`; the caller checked `at_count`.
    fn parse_count(&mut self) -> Result<CountTarget, SyntaxError> {
        const MALFORMED: &str = "malformed aggregate, expected COUNT(*) or COUNT(column)";

        self.pos += 2;
        let target = match self.next() {
            Some(Token::Mul) => CountTarget::Star,
            Some(Token::Word(word)) if is_identifier(&word) => CountTarget::Column(word.value),
            _ => return Err(SyntaxError::select_list(MALFORMED)),
        };
        if !self.next_is(&Token::RParen) {
            return Err(SyntaxError::select_list(MALFORMED));
        }
        Ok(target)
    }

    fn parse_condition(&mut self) -> Result<FilterCondition, SyntaxError> {
        let column = match self.next() {
            Some(Token::Word(word)) if is_identifier(&word) => word.value,
            other => {
                return Err(SyntaxError::condition(format!(
                    "expected column name, found {}",
                    describe(other.as_ref())
                )))
            }
        };

        let operator = match self.next() {
            Some(Token::Eq) => Operator::Eq,
            Some(Token::Neq) => Operator::NotEq,
            Some(Token::Gt) => Operator::Gt,
            Some(Token::Lt) => Operator::Lt,
            Some(Token::GtEq) => Operator::GtEq,
            Some(Token::LtEq) => Operator::LtEq,
            other => {
                return Err(SyntaxError::condition(format!(
                    "expected comparison operator after '{}', found {}",
                    column,
                    describe(other.as_ref())
                )))
            }
        };

        let operand = self.parse_literal()?;

        match self.peek() {
            None => {}
            Some(token) if is_keyword(token, Keyword::AND) || is_keyword(token, Keyword::OR) => {
                return Err(SyntaxError::condition(
                    "only a single condition is supported (no AND/OR)",
                ))
            }
            Some(token) => {
                return Err(SyntaxError::condition(format!(
                    "unexpected '{}' after value",
                    token
                )))
            }
        }

        Ok(FilterCondition {
            column,
            operator,
            operand,
        })
    }

    fn parse_literal(&mut self) -> Result<Literal, SyntaxError> {
        match self.next() {
            Some(Token::SingleQuotedString(s)) | Some(Token::DoubleQuotedString(s)) => {
                Ok(Literal::Text(s))
            }
            // GenericDialect lexes "text" as a quoted identifier
            Some(Token::Word(Word {
                value,
                quote_style: Some('"'),
                ..
            })) => Ok(Literal::Text(value)),
            Some(Token::Number(n, long)) => number_literal(n, long),
            Some(sign @ (Token::Minus | Token::Plus)) => match self.next() {
                Some(Token::Number(n, long)) => {
                    let raw = if sign == Token::Minus {
                        format!("-{}", n)
                    } else {
                        n
                    };
                    number_literal(raw, long)
                }
                other => Err(SyntaxError::Literal(format!(
                    "{}{}",
                    sign,
                    other.map(|t| t.to_string()).unwrap_or_default()
                ))),
            },
            Some(other) => Err(SyntaxError::Literal(other.to_string())),
            None => Err(SyntaxError::condition("missing value after operator")),
        }
    }

    fn parse_identifier(&mut self, what: &str) -> Result<String, SyntaxError> {
        match self.next() {
            Some(Token::Word(word)) if is_identifier(&word) => Ok(word.value),
            other => Err(SyntaxError::expected(what, describe(other.as_ref()))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the next token if it equals `token`.
    fn next_is(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn next_if_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek().is_some_and(|t| is_keyword(t, keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword, name: &str) -> Result<(), SyntaxError> {
        if self.next_if_keyword(keyword) {
            Ok(())
        } else {
            Err(SyntaxError::expected(name, describe(self.peek())))
        }
    }

    /// `COUNT` immediately followed by `(`.
    fn at_count(&self) -> bool {
        let is_count = matches!(
            self.peek(),
            Some(Token::Word(word)) if word.quote_style.is_none() && word.value.eq_ignore_ascii_case("COUNT")
        );
        is_count && self.tokens.get(self.pos + 1) == Some(&Token::LParen)
    }
}

fn is_keyword(token: &Token, keyword: Keyword) -> bool {
    matches!(token, Token::Word(word) if word.quote_style.is_none() && word.keyword == keyword)
}

/// Clause keywords cannot be used as bare identifiers.
fn is_reserved(word: &Word) -> bool {
    word.quote_style.is_none()
        && matches!(word.keyword, Keyword::SELECT | Keyword::FROM | Keyword::WHERE)
}

/// Unquoted, non-reserved, and limited to `[A-Za-z0-9_]` with no leading digit.
///
/// GenericDialect also lexes `@x`, `#x`, `a$b` and quoted names as words.
fn is_identifier(word: &Word) -> bool {
    let mut chars = word.value.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    word.quote_style.is_none()
        && !is_reserved(word)
        && starts_ok
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// The tokenizer flags a trailing `L` (`30L`) as a long literal.
fn number_literal(raw: String, long: bool) -> Result<Literal, SyntaxError> {
    if long {
        return Err(SyntaxError::Literal(format!("{}L", raw)));
    }
    Literal::parse_number(&raw).ok_or(SyntaxError::Literal(raw))
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => format!("'{}'", token),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Projection {
        Projection::Columns(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_wildcard() {
        let query = parse("SELECT * FROM people;").unwrap();
        assert_eq!(query.table_name, "people");
        assert_eq!(query.projection, Projection::Wildcard);
        assert!(query.filter.is_none());
    }

    #[test]
    fn test_parse_column_list_keeps_order_and_duplicates() {
        let query = parse("SELECT name, department, name FROM people").unwrap();
        assert_eq!(query.projection, columns(&["name", "department", "name"]));
    }

    #[test]
    fn test_keywords_case_insensitive_identifiers_case_preserved() {
        let query = parse("select Name from People where Dept = 'HR'").unwrap();
        assert_eq!(query.table_name, "People");
        assert_eq!(query.projection, columns(&["Name"]));
        let filter = query.filter.unwrap();
        assert_eq!(filter.column, "Dept");
        assert_eq!(filter.operand, Literal::Text("HR".into()));
    }

    #[test]
    fn test_parse_count() {
        let query = parse("SELECT COUNT(*) FROM people;").unwrap();
        assert_eq!(query.projection, Projection::Count(CountTarget::Star));

        let query = parse("select count( email ) from people").unwrap();
        assert_eq!(
            query.projection,
            Projection::Count(CountTarget::Column("email".into()))
        );
    }

    #[test]
    fn test_column_named_count() {
        let query = parse("SELECT count FROM stats").unwrap();
        assert_eq!(query.projection, columns(&["count"]));
    }

    #[test]
    fn test_parse_where_operators() {
        let cases = [
            ("=", Operator::Eq),
            ("!=", Operator::NotEq),
            ("<>", Operator::NotEq),
            (">", Operator::Gt),
            ("<", Operator::Lt),
            (">=", Operator::GtEq),
            ("<=", Operator::LtEq),
        ];
        for (symbol, expected) in cases {
            let sql = format!("SELECT * FROM t WHERE age {} 30", symbol);
            let filter = parse(&sql).unwrap().filter.unwrap();
            assert_eq!(filter.operator, expected, "operator {}", symbol);
            assert_eq!(filter.operand, Literal::Number(30.0));
        }
    }

    #[test]
    fn test_operator_without_spaces() {
        let filter = parse("SELECT * FROM t WHERE age>=30").unwrap().filter.unwrap();
        assert_eq!(filter.column, "age");
        assert_eq!(filter.operator, Operator::GtEq);
    }

    #[test]
    fn test_parse_numeric_literals() {
        let operand = |sql: &str| parse(sql).unwrap().filter.unwrap().operand;
        assert_eq!(operand("SELECT * FROM t WHERE x = 2.5"), Literal::Number(2.5));
        assert_eq!(operand("SELECT * FROM t WHERE x = -7"), Literal::Number(-7.0));
        assert_eq!(operand("SELECT * FROM t WHERE x = +7"), Literal::Number(7.0));
    }

    #[test]
    fn test_parse_string_literals() {
        let operand = |sql: &str| parse(sql).unwrap().filter.unwrap().operand;
        assert_eq!(
            operand("SELECT * FROM t WHERE d = 'Research and Development'"),
            Literal::Text("Research and Development".into())
        );
        assert_eq!(
            operand("SELECT * FROM t WHERE d = \"Sales\""),
            Literal::Text("Sales".into())
        );
        assert_eq!(operand("SELECT * FROM t WHERE d = ''"), Literal::Text(String::new()));
        assert_eq!(operand("SELECT * FROM t WHERE d = '42'"), Literal::Text("42".into()));
    }

    #[test]
    fn test_reject_missing_from() {
        let err = parse("SELECT name people").unwrap_err();
        assert!(matches!(err, SyntaxError::Expected { ref expected, .. } if expected == "FROM"));

        let err = parse("SELECT name WHERE a = 1 FROM people").unwrap_err();
        assert!(matches!(err, SyntaxError::Expected { ref expected, .. } if expected == "FROM"));
    }

    #[test]
    fn test_reject_bad_select_lists() {
        for sql in [
            "SELECT FROM people",
            "SELECT name, FROM people",
            "SELECT , name FROM people",
            "SELECT name,, email FROM people",
            "SELECT name, COUNT(*) FROM people",
            "SELECT COUNT(*), name FROM people",
            "SELECT *, name FROM people",
            "SELECT name, * FROM people",
            "SELECT COUNT() FROM people",
            "SELECT COUNT(a, b) FROM people",
            "SELECT COUNT(* FROM people",
        ] {
            let err = parse(sql).unwrap_err();
            assert!(
                matches!(err, SyntaxError::SelectList(_)),
                "{} gave {:?}",
                sql,
                err
            );
        }
    }

    #[test]
    fn test_reject_extra_table_tokens() {
        assert!(parse("SELECT * FROM people extra").is_err());
        assert!(parse("SELECT * FROM people, orders").is_err());
        assert!(parse("SELECT * FROM").is_err());
    }

    #[test]
    fn test_reject_bad_conditions() {
        let err = parse("SELECT * FROM t WHERE a = 1 AND b = 2").unwrap_err();
        assert!(matches!(err, SyntaxError::Condition(_)));

        let err = parse("SELECT * FROM t WHERE a = 1 OR b = 2").unwrap_err();
        assert!(matches!(err, SyntaxError::Condition(_)));

        let err = parse("SELECT * FROM t WHERE a").unwrap_err();
        assert!(matches!(err, SyntaxError::Condition(_)));

        let err = parse("SELECT * FROM t WHERE").unwrap_err();
        assert!(matches!(err, SyntaxError::Condition(_)));

        let err = parse("SELECT * FROM t WHERE a = ").unwrap_err();
        assert!(matches!(err, SyntaxError::Condition(_)));
    }

    #[test]
    fn test_reject_unquoted_text_value() {
        let err = parse("SELECT * FROM t WHERE department = Engineering").unwrap_err();
        assert!(matches!(err, SyntaxError::Literal(ref v) if v == "Engineering"));
    }

    #[test]
    fn test_reject_long_number_suffix() {
        let err = parse("SELECT * FROM t WHERE x = 30L").unwrap_err();
        assert!(matches!(err, SyntaxError::Literal(ref v) if v == "30L"), "{:?}", err);

        let err = parse("SELECT * FROM t WHERE x = -30L").unwrap_err();
        assert!(matches!(err, SyntaxError::Literal(ref v) if v == "-30L"), "{:?}", err);
    }

    #[test]
    fn test_reject_non_bare_identifiers() {
        for sql in [
            "SELECT @x FROM t",
            "SELECT #x FROM t",
            "SELECT `x` FROM t",
            "SELECT \"x\" FROM t",
            "SELECT a$b FROM t",
            "SELECT * FROM @t",
            "SELECT COUNT(#x) FROM t",
            "SELECT * FROM t WHERE @x = 1",
        ] {
            assert!(parse(sql).is_err(), "{} should be rejected", sql);
        }

        let query = parse("SELECT _id, col2 FROM t_1").unwrap();
        assert_eq!(query.projection, columns(&["_id", "col2"]));
        assert_eq!(query.table_name, "t_1");
    }

    #[test]
    fn test_reject_unterminated_string() {
        let err = parse("SELECT * FROM t WHERE name = 'Ann").unwrap_err();
        assert!(matches!(err, SyntaxError::Tokenize(_)));
    }

    #[test]
    fn test_reject_empty_and_trailing_input() {
        assert_eq!(parse("   ").unwrap_err(), SyntaxError::Empty);
        assert_eq!(parse(";").unwrap_err(), SyntaxError::Empty);
        assert!(parse("SELECT * FROM t;;").is_err());
        assert!(parse("SELECT * FROM t; SELECT * FROM t").is_err());
    }

    #[test]
    fn test_reject_non_select() {
        assert!(parse("DELETE FROM people").is_err());
        assert!(parse("INSERT INTO people VALUES (1)").is_err());
    }

    #[test]
    fn test_errors_carry_grammar_hint() {
        let err = parse("SELECT name people").unwrap_err();
        assert!(err.to_string().contains("Expected: SELECT"));
    }

    #[test]
    fn test_validate() {
        assert!(QueryParser::validate("SELECT * FROM people"));
        assert!(!QueryParser::validate("SELECT * people"));
    }
}
