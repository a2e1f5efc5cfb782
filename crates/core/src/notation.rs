use log::debug;
use std::collections::HashMap;

use crate::error::StructureError;
use crate::parser::{parse, parse_classification};
use crate::types::{AnnotatedPair, AnnotatedStructure, PairStyle};

/// Parse an annotation document.
///
/// ```text
/// seq uAGGGUUAGGGUuAGGGUUAGGGU
/// cWH ..([{...)]}...([{...)]}.
/// cHW ..([{...............)]}. color=#c00000 thickness=2
/// ```
///
/// Each line is either `seq <sequence>` or `<code> <brackets>`, the latter
/// optionally followed by `color=` and `thickness=` settings applied to
/// every pair of the line. Blank lines and `#` comments are skipped. Pairs
/// are returned in document order, and within a line in closing-bracket
/// order.
pub fn parse_document(text: &str) -> Result<AnnotatedStructure, StructureError> {
    let mut sequence: Option<String> = None;
    let mut pairs: Vec<AnnotatedPair> = Vec::new();
    // (line number, bracket string length) for the length check at the end
    let mut widths: Vec<(usize, usize)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let [head, body, ref settings @ ..] = tokens[..] else {
            return Err(StructureError::MalformedLine { line });
        };

        if head.eq_ignore_ascii_case("seq") {
            if !settings.is_empty() {
                return Err(StructureError::MalformedLine { line });
            }
            if sequence.is_some() {
                return Err(StructureError::DuplicateSequence { line });
            }
            sequence = Some(body.to_string());
            continue;
        }

        let classification = parse_classification(head).map_err(|e| e.at_line(line))?;
        let relations = parse(body).map_err(|e| e.at_line(line))?;
        let style = parse_style(settings, line)?;
        debug!(
            "line {line}: {} pairs classified {classification}",
            relations.len()
        );
        pairs.extend(relations.into_iter().map(|relation| AnnotatedPair {
            relation,
            classification,
            style,
        }));
        widths.push((line, body.chars().count()));
    }

    if let Some(seq) = &sequence {
        let expected = seq.chars().count();
        if let Some(&(line, found)) = widths.iter().find(|&&(_, found)| found != expected) {
            return Err(StructureError::LengthMismatch {
                line,
                expected,
                found,
            });
        }
    }

    log_multi_paired(&pairs);

    Ok(AnnotatedStructure { sequence, pairs })
}

fn parse_style(settings: &[&str], line: usize) -> Result<PairStyle, StructureError> {
    let mut style = PairStyle::default();
    for &token in settings {
        let invalid = || StructureError::InvalidStyle {
            line,
            token: token.to_string(),
        };
        match token.split_once('=') {
            Some(("color", value)) => style.color = Some(value.parse().map_err(|_| invalid())?),
            Some(("thickness", value)) => {
                let t: f64 = value.parse().map_err(|_| invalid())?;
                if !(t.is_finite() && t > 0.0) {
                    return Err(invalid());
                }
                style.thickness = Some(t);
            }
            _ => return Err(invalid()),
        }
    }
    Ok(style)
}

/// Positions taking part in more than one pair are legal here (base
/// triples, non-canonical contacts).
fn log_multi_paired(pairs: &[AnnotatedPair]) {
    let mut uses: HashMap<usize, usize> = HashMap::new();
    for p in pairs {
        *uses.entry(p.relation.i).or_default() += 1;
        *uses.entry(p.relation.j).or_default() += 1;
    }
    let mut shared: Vec<usize> = uses
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(pos, _)| pos)
        .collect();
    if !shared.is_empty() {
        shared.sort_unstable();
        debug!("positions paired more than once: {shared:?}");
    }
}
