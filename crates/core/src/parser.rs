use crate::error::StructureError;
use crate::types::{BasePairClassification, Edge, PairRelation, Stericity};

/// Opening brackets; `CLOSING[k]` closes `OPENING[k]`.
pub const OPENING: [char; ALPHABET_SIZE] = [
    '(', '[', '{', '<', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Closing brackets, same order as [`OPENING`].
pub const CLOSING: [char; ALPHABET_SIZE] = [
    ')', ']', '}', '>', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const ALPHABET_SIZE: usize = 30;

/// A bracket symbol resolved to its ordinal in the alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bracket {
    Open(usize),
    Close(usize),
}

/// Resolve a character to its bracket ordinal, if it is one.
pub fn bracket_order(c: char) -> Option<Bracket> {
    match c {
        '(' => Some(Bracket::Open(0)),
        '[' => Some(Bracket::Open(1)),
        '{' => Some(Bracket::Open(2)),
        '<' => Some(Bracket::Open(3)),
        ')' => Some(Bracket::Close(0)),
        ']' => Some(Bracket::Close(1)),
        '}' => Some(Bracket::Close(2)),
        '>' => Some(Bracket::Close(3)),
        'A'..='Z' => Some(Bracket::Open(4 + (c as usize - 'A' as usize))),
        'a'..='z' => Some(Bracket::Close(4 + (c as usize - 'a' as usize))),
        _ => None,
    }
}

/// Parse extended dot-bracket notation into pair relations.
///
/// Characters: `.` = unpaired, any of the 30 opening brackets opens a pair,
/// the closing bracket at the same alphabet position closes it. Each bracket
/// class nests independently of the others, so `([)]` is a valid pseudoknot.
///
/// Relations are returned in the order their closing brackets appear, not
/// sorted by position. Returns Err on any character outside the alphabet
/// and on unmatched brackets of either kind.
pub fn parse(structure: &str) -> Result<Vec<PairRelation>, StructureError> {
    let mut stacks: [Vec<usize>; ALPHABET_SIZE] = std::array::from_fn(|_| Vec::new());
    let mut pairs: Vec<PairRelation> = Vec::new();

    for (position, symbol) in structure.chars().enumerate() {
        if symbol == '.' {
            continue;
        }
        match bracket_order(symbol) {
            Some(Bracket::Open(k)) => stacks[k].push(position),
            Some(Bracket::Close(k)) => {
                let j = stacks[k]
                    .pop()
                    .ok_or(StructureError::UnmatchedClosingBracket { symbol, position })?;
                pairs.push(PairRelation::new(position, j));
            }
            None => return Err(StructureError::InvalidSymbol { symbol, position }),
        }
    }

    // Report the left-most opener still waiting for its partner
    let leftover = stacks
        .iter()
        .enumerate()
        .filter_map(|(k, stack)| stack.first().map(|&position| (position, k)))
        .min();
    if let Some((position, k)) = leftover {
        return Err(StructureError::UnmatchedOpeningBracket {
            symbol: OPENING[k],
            position,
        });
    }

    Ok(pairs)
}

/// Parse a 3-letter Leontis-Westhof code: stericity (`c`/`t`), then the
/// edge of the 5' partner and of the 3' partner (`w`/`h`/`s`).
///
/// Letters are matched case-insensitively, so `cWH` and `cwh` agree.
pub fn parse_classification(code: &str) -> Result<BasePairClassification, StructureError> {
    let letters: Vec<char> = code.chars().map(|c| c.to_ascii_lowercase()).collect();
    let [s, e5, e3] = letters[..] else {
        return Err(StructureError::InvalidCodeLength {
            code: code.to_string(),
        });
    };
    Ok(BasePairClassification::new(
        edge(e5)?,
        edge(e3)?,
        stericity(s)?,
    ))
}

fn stericity(code: char) -> Result<Stericity, StructureError> {
    match code {
        'c' => Ok(Stericity::Cis),
        't' => Ok(Stericity::Trans),
        _ => Err(StructureError::InvalidStericityCode { code }),
    }
}

fn edge(code: char) -> Result<Edge, StructureError> {
    match code {
        'w' => Ok(Edge::WatsonCrick),
        'h' => Ok(Edge::Hoogsteen),
        's' => Ok(Edge::Sugar),
        _ => Err(StructureError::InvalidEdgeCode { code }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relations(pairs: &[(usize, usize)]) -> Vec<PairRelation> {
        pairs.iter().map(|&(i, j)| PairRelation::new(i, j)).collect()
    }

    #[test]
    fn test_alphabet_tables_agree() {
        for k in 0..ALPHABET_SIZE {
            assert_eq!(bracket_order(OPENING[k]), Some(Bracket::Open(k)));
            assert_eq!(bracket_order(CLOSING[k]), Some(Bracket::Close(k)));
        }
        assert_eq!(bracket_order('.'), None);
        assert_eq!(bracket_order('+'), None);
    }

    #[test]
    fn test_empty_and_dots() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(".").unwrap().is_empty());
        assert!(parse(".....").unwrap().is_empty());
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(parse("()").unwrap(), relations(&[(1, 0)]));
    }

    #[test]
    fn test_nested_closing_order() {
        let pairs = parse("((.))").unwrap();
        assert_eq!(pairs, relations(&[(3, 1), (4, 0)]));
    }

    #[test]
    fn test_sibling_hairpins() {
        let pairs = parse("(.)(.)").unwrap();
        assert_eq!(pairs, relations(&[(2, 0), (5, 3)]));
    }

    #[test]
    fn test_pseudoknot() {
        let pairs = parse("((([[[)))]]].").unwrap();
        assert_eq!(
            pairs,
            relations(&[(6, 2), (7, 1), (8, 0), (9, 5), (10, 4), (11, 3)])
        );
    }

    #[test]
    fn test_letter_brackets() {
        let pairs = parse("A(B)a.b").unwrap();
        assert_eq!(pairs, relations(&[(3, 1), (4, 0), (6, 2)]));
    }

    #[test]
    fn test_companion_example() {
        let pairs = parse("..([{...)]}.").unwrap();
        assert_eq!(pairs, relations(&[(8, 2), (9, 3), (10, 4)]));
    }

    #[test]
    fn test_mismatched_alphabet() {
        assert_eq!(
            parse("(]"),
            Err(StructureError::UnmatchedClosingBracket {
                symbol: ']',
                position: 1
            })
        );
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(
            parse("())"),
            Err(StructureError::UnmatchedClosingBracket {
                symbol: ')',
                position: 2
            })
        );
    }

    #[test]
    fn test_unmatched_open() {
        assert_eq!(
            parse("("),
            Err(StructureError::UnmatchedOpeningBracket {
                symbol: '(',
                position: 0
            })
        );
        // left-most leftover is reported, across alphabets
        assert_eq!(
            parse(".[(..)"),
            Err(StructureError::UnmatchedOpeningBracket {
                symbol: '[',
                position: 1
            })
        );
    }

    #[test]
    fn test_bad_char() {
        assert_eq!(
            parse("(x)"),
            Err(StructureError::UnmatchedClosingBracket {
                symbol: 'x',
                position: 1
            })
        );
        assert_eq!(
            parse("(+)"),
            Err(StructureError::InvalidSymbol {
                symbol: '+',
                position: 1
            })
        );
        assert_eq!(
            parse("..1"),
            Err(StructureError::InvalidSymbol {
                symbol: '1',
                position: 2
            })
        );
    }

    #[test]
    fn test_classification_codes() {
        let c = parse_classification("cwh").unwrap();
        assert_eq!(
            c,
            BasePairClassification::new(Edge::WatsonCrick, Edge::Hoogsteen, Stericity::Cis)
        );
        let t = parse_classification("TSW").unwrap();
        assert_eq!(
            t,
            BasePairClassification::new(Edge::Sugar, Edge::WatsonCrick, Stericity::Trans)
        );
    }

    #[test]
    fn test_classification_errors() {
        assert_eq!(
            parse_classification("xwh"),
            Err(StructureError::InvalidStericityCode { code: 'x' })
        );
        assert_eq!(
            parse_classification("cwq"),
            Err(StructureError::InvalidEdgeCode { code: 'q' })
        );
        assert_eq!(
            parse_classification("cw"),
            Err(StructureError::InvalidCodeLength { code: "cw".into() })
        );
        assert!(parse_classification("cwhs").is_err());
    }
}
