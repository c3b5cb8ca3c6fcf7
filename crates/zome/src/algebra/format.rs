//! Textual number and vector formats.
//!
//! | code | format       | golden example (4 + 3φ) |
//! |------|--------------|-------------------------|
//! | 0    | `Default`    | `4 +3φ`                 |
//! | 1    | `Expression` | `4 +3*phi`              |
//! | 2    | `Zomic`      | `4 3`                   |
//! | 3    | `Vef`        | `(3,4)`                 |
//!
//! Each parser inverts its formatter exactly. Per-term coefficients are
//! printed as reduced rationals (`1/2`), so no precision is lost.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::error::AlgebraError;
use super::field::Field;
use super::number::AlgebraicNumber;
use super::vector::AlgebraicVector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// Signed terms with the irrational's symbol: `4 +3φ`.
    #[default]
    Default,
    /// Signed terms with ASCII names: `4 +3*phi`.
    Expression,
    /// Every coefficient, space separated, rational term first: `4 3`.
    Zomic,
    /// Parenthesized, highest term first: `(3,4)`.
    Vef,
}

impl NumberFormat {
    pub const ALL: [NumberFormat; 4] = [
        NumberFormat::Default,
        NumberFormat::Expression,
        NumberFormat::Zomic,
        NumberFormat::Vef,
    ];

    /// Stable numeric code used by persisted documents.
    pub fn code(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Expression => 1,
            Self::Zomic => 2,
            Self::Vef => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Expression => "expression",
            Self::Zomic => "zomic",
            Self::Vef => "vef",
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberFormat {
    type Err = AlgebraError;

    /// Accepts the lowercase name or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| AlgebraError::parse(s, "unknown format code"));
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AlgebraError::parse(s, "unknown format name"))
    }
}

fn rational_terms(x: &AlgebraicNumber) -> Vec<BigRational> {
    x.numerators()
        .iter()
        .map(|n| BigRational::new(n.clone(), x.denominator().clone()))
        .collect()
}

pub(crate) fn format_number(x: &AlgebraicNumber, format: NumberFormat) -> String {
    let terms = rational_terms(x);
    match format {
        NumberFormat::Default | NumberFormat::Expression => format_signed(x.field(), &terms, format),
        NumberFormat::Zomic => terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        NumberFormat::Vef => {
            let inner: Vec<String> = terms.iter().rev().map(ToString::to_string).collect();
            format!("({})", inner.join(","))
        }
    }
}

fn format_signed(field: &Field, terms: &[BigRational], format: NumberFormat) -> String {
    let expression = format == NumberFormat::Expression;
    let mut out = String::new();
    for (i, t) in terms.iter().enumerate() {
        if t.is_zero() {
            continue;
        }
        let mag = t.abs();
        let body = if i == 0 {
            mag.to_string()
        } else {
            let sym = if expression {
                &field.expression_names()[i]
            } else {
                &field.symbols()[i]
            };
            match (mag.is_one(), expression) {
                (true, _) => sym.clone(),
                (false, true) => format!("{mag}*{sym}"),
                (false, false) => format!("{mag}{sym}"),
            }
        };
        if out.is_empty() {
            if t.is_negative() {
                out.push('-');
            }
        } else {
            out.push_str(if t.is_negative() { " -" } else { " +" });
        }
        out.push_str(&body);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

pub(crate) fn format_vector(v: &AlgebraicVector, format: NumberFormat) -> String {
    let parts: Vec<String> = v.coords().iter().map(|c| format_number(c, format)).collect();
    match format {
        NumberFormat::Default | NumberFormat::Expression => format!("({})", parts.join(", ")),
        NumberFormat::Zomic | NumberFormat::Vef => parts.join(" "),
    }
}

/// Parse `[-+]digits[/digits]` without going through floating point.
fn parse_rational(input: &str, text: &str) -> Result<BigRational, AlgebraError> {
    let (neg, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (num, den) = match body.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (body, None),
    };
    let digits = |s: &str| -> Result<BigInt, AlgebraError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AlgebraError::parse(input, format!("bad coefficient {text:?}")));
        }
        BigInt::from_str(s).map_err(|e| AlgebraError::parse(input, e.to_string()))
    };
    let mut num = digits(num)?;
    let den = match den {
        Some(d) => digits(d)?,
        None => BigInt::one(),
    };
    if den.is_zero() {
        return Err(AlgebraError::parse(input, "zero denominator"));
    }
    if neg {
        num = -num;
    }
    Ok(BigRational::new(num, den))
}

impl Field {
    /// Parse a number written in `format`.
    pub fn parse_number(&self, input: &str, format: NumberFormat) -> Result<AlgebraicNumber, AlgebraError> {
        match format {
            NumberFormat::Default => self.parse_signed(input, false),
            NumberFormat::Expression => self.parse_signed(input, true),
            NumberFormat::Zomic => {
                let tokens: Vec<&str> = input.split_whitespace().collect();
                if tokens.len() != self.order() {
                    return Err(AlgebraError::parse(
                        input,
                        format!("expected {} terms, found {}", self.order(), tokens.len()),
                    ));
                }
                let terms = tokens
                    .iter()
                    .map(|t| parse_rational(input, t))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.from_rationals(&terms))
            }
            NumberFormat::Vef => self.parse_vef_number(input, false),
        }
    }

    /// Parse a VEF number: a bare rational when `is_rational`, otherwise a
    /// parenthesized tuple listing the highest term first. Tuples shorter
    /// than the field's order leave the missing high terms zero.
    pub fn parse_vef_number(&self, input: &str, is_rational: bool) -> Result<AlgebraicNumber, AlgebraError> {
        let text = input.trim();
        if is_rational {
            let r = parse_rational(input, text)?;
            return Ok(self.rational_number(r));
        }
        let inner = text
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| AlgebraError::parse(input, "expected (..)"))?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() > self.order() {
            return Err(AlgebraError::parse(
                input,
                format!("{} terms exceed order {}", parts.len(), self.order()),
            ));
        }
        let mut terms = vec![BigRational::zero(); self.order()];
        for (slot, part) in terms.iter_mut().zip(parts.iter().rev()) {
            *slot = parse_rational(input, part)?;
        }
        Ok(self.from_rationals(&terms))
    }

    /// Parse a number of unknown vintage: VEF, Zomic, default, then
    /// expression format are tried in turn.
    pub fn parse_legacy_number(&self, input: &str) -> Result<AlgebraicNumber, AlgebraError> {
        let text = input.trim();
        if text.starts_with('(') {
            return self.parse_vef_number(text, false);
        }
        [NumberFormat::Zomic, NumberFormat::Default, NumberFormat::Expression]
            .into_iter()
            .find_map(|f| self.parse_number(text, f).ok())
            .ok_or_else(|| AlgebraError::parse(input, "no format matched"))
    }

    /// Parse a vector written in `format` (see the module table).
    pub fn parse_vector(&self, input: &str, format: NumberFormat) -> Result<AlgebraicVector, AlgebraError> {
        let coords = match format {
            NumberFormat::Default | NumberFormat::Expression => {
                let inner = input
                    .trim()
                    .strip_prefix('(')
                    .and_then(|s| s.strip_suffix(')'))
                    .ok_or_else(|| AlgebraError::parse(input, "expected (..)"))?;
                inner
                    .split(',')
                    .map(|c| self.parse_number(c, format))
                    .collect::<Result<Vec<_>, _>>()?
            }
            NumberFormat::Zomic => {
                let tokens: Vec<&str> = input.split_whitespace().collect();
                if tokens.is_empty() || tokens.len() % self.order() != 0 {
                    return Err(AlgebraError::parse(
                        input,
                        format!("{} terms is not a multiple of order {}", tokens.len(), self.order()),
                    ));
                }
                tokens
                    .chunks(self.order())
                    .map(|chunk| self.parse_number(&chunk.join(" "), format))
                    .collect::<Result<Vec<_>, _>>()?
            }
            NumberFormat::Vef => {
                let coords = input
                    .split_whitespace()
                    .map(|c| self.parse_vef_number(c, false))
                    .collect::<Result<Vec<_>, _>>()?;
                if coords.is_empty() {
                    return Err(AlgebraError::parse(input, "empty vector"));
                }
                coords
            }
        };
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    fn rational_number(&self, r: BigRational) -> AlgebraicNumber {
        let mut terms = vec![BigRational::zero(); self.order()];
        terms[0] = r;
        self.from_rationals(&terms)
    }

    /// Default and expression formats: whitespace separated signed terms,
    /// every term after the first carrying an explicit sign.
    fn parse_signed(&self, input: &str, expression: bool) -> Result<AlgebraicNumber, AlgebraError> {
        let mut terms = vec![BigRational::zero(); self.order()];
        let mut seen = vec![false; self.order()];
        let mut pending: Option<bool> = None;
        let mut count = 0;
        for tok in input.split_whitespace() {
            if tok == "+" || tok == "-" {
                if pending.is_some() {
                    return Err(AlgebraError::parse(input, "doubled sign"));
                }
                pending = Some(tok == "-");
                continue;
            }
            let (neg, body) = match (pending.take(), tok.strip_prefix('-'), tok.strip_prefix('+')) {
                (Some(neg), None, None) => (neg, tok),
                (Some(_), _, _) => return Err(AlgebraError::parse(input, "doubled sign")),
                (None, Some(rest), _) => (true, rest),
                (None, None, Some(rest)) => (false, rest),
                (None, None, None) if count == 0 => (false, tok),
                (None, None, None) => {
                    return Err(AlgebraError::parse(input, format!("term {tok:?} needs a sign")))
                }
            };
            count += 1;
            let (term, coef) = self.split_term(input, body, expression)?;
            let mut value = if coef.is_empty() {
                if term == 0 {
                    return Err(AlgebraError::parse(input, "empty term"));
                }
                BigRational::one()
            } else {
                parse_rational(input, coef)?
            };
            if neg {
                value = -value;
            }
            if std::mem::replace(&mut seen[term], true) {
                return Err(AlgebraError::parse(input, "repeated term"));
            }
            terms[term] = value;
        }
        if count == 0 || pending.is_some() {
            return Err(AlgebraError::parse(input, "incomplete number"));
        }
        Ok(self.from_rationals(&terms))
    }

    /// Split an unsigned term into (basis index, coefficient text).
    fn split_term<'a>(
        &self,
        input: &str,
        body: &'a str,
        expression: bool,
    ) -> Result<(usize, &'a str), AlgebraError> {
        if expression {
            let names = self.expression_names();
            if let Some(i) = (1..self.order()).find(|&i| names[i] == body) {
                return Ok((i, ""));
            }
            return match body.split_once('*') {
                Some((coef, name)) => (1..self.order())
                    .find(|&i| names[i] == name)
                    .map(|i| (i, coef))
                    .ok_or_else(|| AlgebraError::parse(input, format!("unknown irrational {name:?}"))),
                None => Ok((0, body)),
            };
        }
        let symbols = self.symbols();
        let mut by_len: Vec<usize> = (1..self.order()).collect();
        by_len.sort_by_key(|&i| std::cmp::Reverse(symbols[i].len()));
        for i in by_len {
            if let Some(coef) = body.strip_suffix(symbols[i].as_str()) {
                return Ok((i, coef));
            }
        }
        Ok((0, body))
    }
}
