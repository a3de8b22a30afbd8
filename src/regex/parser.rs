//! Pattern syntax to symbolic terms
//!
//! Recursive-descent parser for the modest pattern dialect the scan
//! subroutines use: literals, backslash escapes, `.`, alternation `|`,
//! the quantifiers `*` `+` `?`, grouping `( )`, and the line anchors
//! `^` `$`. Character classes and counted quantifiers are deliberately
//! not part of the dialect.
//!
//! `+` and `?` are rewritten immediately (`X+` to `X X*`, `X?` to `X|ε`)
//! so downstream stages only ever see the four term shapes.

use crate::automaton::bounds::TextBound;
use crate::regex::term::RegexTerm;
use crate::utils::error::{EngineError, EngineResult};

/// Parse a pattern into a simplified term
pub fn parse(pattern: &str) -> EngineResult<RegexTerm> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        position: 0,
    };
    let term = parser.alternation()?;
    if parser.position < parser.chars.len() {
        return Err(EngineError::regex_at(
            format!("unexpected '{}'", parser.chars[parser.position]),
            parser.position,
        ));
    }
    Ok(term.simplify())
}

struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    /// alternation := sequence ('|' sequence)*
    fn alternation(&mut self) -> EngineResult<RegexTerm> {
        let mut branches = vec![self.sequence()?];
        while self.peek() == Some('|') {
            self.advance();
            branches.push(self.sequence()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(RegexTerm::alt(branches))
        }
    }

    /// sequence := quantified*
    fn sequence(&mut self) -> EngineResult<RegexTerm> {
        let mut items = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == '|' || ch == ')' {
                break;
            }
            items.push(self.quantified()?);
        }
        Ok(RegexTerm::concat(items))
    }

    /// quantified := atom ('*' | '+' | '?')*
    fn quantified(&mut self) -> EngineResult<RegexTerm> {
        let mut term = self.atom()?;
        while let Some(q) = self.peek() {
            match q {
                '*' => {
                    self.advance();
                    term = RegexTerm::star(term);
                }
                '+' => {
                    self.advance();
                    term = RegexTerm::concat(vec![term.clone(), RegexTerm::star(term)]);
                }
                '?' => {
                    self.advance();
                    term = RegexTerm::alt(vec![term, RegexTerm::epsilon()]);
                }
                _ => break,
            }
        }
        Ok(term)
    }

    fn atom(&mut self) -> EngineResult<RegexTerm> {
        let start = self.position;
        let ch = self
            .advance()
            .ok_or_else(|| EngineError::regex_at("expected an atom", start))?;
        match ch {
            '(' => {
                let inner = self.alternation()?;
                if self.advance() != Some(')') {
                    return Err(EngineError::regex_at("unclosed group", start));
                }
                Ok(inner)
            }
            ')' => Err(EngineError::regex_at("unmatched ')'", start)),
            '*' | '+' | '?' => Err(EngineError::regex_at(
                format!("dangling quantifier '{}'", ch),
                start,
            )),
            '.' => Ok(RegexTerm::any()),
            '^' => Ok(RegexTerm::bound(TextBound::BeginLine)),
            '$' => Ok(RegexTerm::bound(TextBound::EndLine)),
            '\\' => {
                let escaped = self
                    .advance()
                    .ok_or_else(|| EngineError::regex_at("dangling escape", start))?;
                let literal = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' | '.' | '|' | '*' | '+' | '?' | '(' | ')' | '^' | '$' => escaped,
                    other => {
                        return Err(EngineError::regex_at(
                            format!("unsupported escape '\\{}'", other),
                            start,
                        ))
                    }
                };
                Ok(RegexTerm::symbol(literal))
            }
            literal => Ok(RegexTerm::symbol(literal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::term::Atom;

    #[test]
    fn test_literal_sequence() {
        let term = parse("ab").unwrap();
        assert_eq!(
            term,
            RegexTerm::concat(vec![RegexTerm::symbol('a'), RegexTerm::symbol('b')])
        );
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(parse("a").unwrap(), RegexTerm::symbol('a'));
    }

    #[test]
    fn test_alternation_and_star() {
        let term = parse("a|b*").unwrap();
        assert_eq!(
            term,
            RegexTerm::alt(vec![
                RegexTerm::symbol('a'),
                RegexTerm::star(RegexTerm::symbol('b')),
            ])
        );
    }

    #[test]
    fn test_plus_rewrites_to_star() {
        let term = parse("a+").unwrap();
        assert_eq!(
            term,
            RegexTerm::concat(vec![
                RegexTerm::symbol('a'),
                RegexTerm::star(RegexTerm::symbol('a')),
            ])
        );
    }

    #[test]
    fn test_optional_rewrites_to_alt() {
        let term = parse("a?").unwrap();
        assert_eq!(
            term,
            RegexTerm::alt(vec![RegexTerm::symbol('a'), RegexTerm::epsilon()])
        );
    }

    #[test]
    fn test_grouping() {
        let term = parse("(a|b)c").unwrap();
        // Distribution runs during simplify
        assert_eq!(
            term,
            RegexTerm::alt(vec![
                RegexTerm::concat(vec![RegexTerm::symbol('a'), RegexTerm::symbol('c')]),
                RegexTerm::concat(vec![RegexTerm::symbol('b'), RegexTerm::symbol('c')]),
            ])
        );
    }

    #[test]
    fn test_anchors() {
        let term = parse("^a$").unwrap();
        assert_eq!(
            term,
            RegexTerm::concat(vec![
                RegexTerm::bound(TextBound::BeginLine),
                RegexTerm::symbol('a'),
                RegexTerm::bound(TextBound::EndLine),
            ])
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(parse("\\n").unwrap(), RegexTerm::symbol('\n'));
        assert_eq!(parse("\\*").unwrap(), RegexTerm::symbol('*'));
        assert_eq!(parse("\\\\").unwrap(), RegexTerm::symbol('\\'));
    }

    #[test]
    fn test_dot() {
        assert_eq!(parse(".").unwrap(), RegexTerm::Leaf(Atom::Any));
    }

    #[test]
    fn test_errors_carry_position() {
        for bad in ["(ab", "a)", "*a", "a\\"] {
            let err = parse(bad).unwrap_err();
            assert!(
                matches!(err, EngineError::RegexSyntax { position: Some(_), .. }),
                "expected positioned syntax error for {:?}, got {}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_empty_pattern_is_epsilon() {
        assert_eq!(parse("").unwrap(), RegexTerm::epsilon());
    }
}
