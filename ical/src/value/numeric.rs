// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for FLOAT values and the GEO pair built on them.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;

use crate::value::miscellaneous::{ValueExpected, digits};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
pub fn value_float<'src, I, E>() -> impl Parser<'src, I, f64, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let sign = select! { c @ ('+' | '-') => c }.or_not();
    let fractional_part = just('.').ignore_then(digits());

    sign.then(digits())
        .then(fractional_part.or_not())
        .try_map(|((sign, int_part), frac_part), span| {
            let mut s = String::with_capacity(
                1 + int_part.len() + frac_part.as_ref().map_or(0, |f| 1 + f.len()),
            );
            if let Some(sign) = sign {
                s.push(sign);
            }
            s.push_str(&int_part);
            if let Some(frac) = frac_part {
                s.push('.');
                s.push_str(&frac);
            }

            match lexical::parse::<f64, _>(&s) {
                Ok(f) if f.is_finite() => Ok(f),
                _ => Err(E::Error::expected_found([ValueExpected::F64], None, span)),
            }
        })
}

/// Geographic position of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub long: f64,
}

/// Format Definition:
///
/// ```txt
/// geovalue = float ";" float
/// ;Latitude and Longitude components
/// ```
///
/// A comma is accepted in place of the semicolon.
pub fn value_geo<'src, I, E>() -> impl Parser<'src, I, Geo, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_float()
        .then_ignore(one_of([';', ',']))
        .then(value_float())
        .map(|(lat, long)| Geo { lat, long })
}
