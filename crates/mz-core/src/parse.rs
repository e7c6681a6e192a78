//! Text formats for placements, sizes, offsets, insets, closings, modifiers
//! and path ends
//!
//! Compound values use `/` between their parts, for example
//! `center/3x3/1,0` for an area or `left/2/x` for a dead-end path end.

use std::str::FromStr;

use strum::IntoEnumIterator;
use thiserror::Error;

use crate::generator::PathEnd;
use crate::geometry::{Closing, ClosingType, Insets, Offset, Placement, Size};
use crate::grid::{Area, Modifier, ModifierKind};

/// Exclusive upper bound for sizes, insets and the magnitude of offsets
const VALUE_LIMIT: i32 = 10_000;

/// Error parsing one of the text formats
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("The {what} parameter is empty.")]
    Empty { what: &'static str },

    #[error("The text '{text}' is not a valid {what} name. Valid values are {valid}.")]
    UnknownName {
        text: String,
        what: &'static str,
        valid: String,
    },

    #[error("The text '{text}' is not a valid {what}. {hint}")]
    Invalid {
        text: String,
        what: &'static str,
        hint: &'static str,
    },

    #[error("{0}")]
    Structure(&'static str),
}

fn names<T: IntoEnumIterator + ToString>() -> String {
    T::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse a placement name or alias
pub fn parse_placement(text: &str) -> Result<Placement, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty { what: "placement" });
    }
    Placement::from_str(&text.to_lowercase()).map_err(|_| ParseError::UnknownName {
        text: text.to_string(),
        what: "placement",
        valid: names::<Placement>(),
    })
}

/// Parse a closing type name or alias
pub fn parse_closing_type(text: &str) -> Result<ClosingType, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty {
            what: "closing type",
        });
    }
    ClosingType::from_str(&text.to_lowercase()).map_err(|_| ParseError::UnknownName {
        text: text.to_string(),
        what: "closing type",
        valid: names::<ClosingType>(),
    })
}

fn bounded_value(text: &str, what: &'static str, hint: &'static str) -> Result<i32, ParseError> {
    let invalid = || ParseError::Invalid {
        text: text.to_string(),
        what,
        hint,
    };
    let value: i32 = text.trim().parse().map_err(|_| invalid())?;
    if !(1..VALUE_LIMIT).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}

impl FromStr for Size {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        const HINT: &str = "Use single, small, medium, large, a number or WxH with values from 1 to 9999.";
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return Err(ParseError::Empty { what: "size" });
        }
        match lower.as_str() {
            "single" => return Ok(Size::new(1, 1)),
            "small" => return Ok(Size::new(2, 2)),
            "medium" => return Ok(Size::new(3, 3)),
            "large" => return Ok(Size::new(4, 4)),
            _ => {}
        }
        let parts: Vec<&str> = lower.split('x').collect();
        match parts.as_slice() {
            [value] => {
                let value = bounded_value(value, "size", HINT)?;
                Ok(Size::new(value, value))
            }
            [width, height] => Ok(Size::new(
                bounded_value(width, "size", HINT)?,
                bounded_value(height, "size", HINT)?,
            )),
            _ => Err(ParseError::Invalid {
                text: text.to_string(),
                what: "size",
                hint: HINT,
            }),
        }
    }
}

impl FromStr for Offset {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::Empty { what: "offset" });
        }
        let invalid = || ParseError::Invalid {
            text: text.to_string(),
            what: "offset",
            hint: "Either specify a single positive or negative integer value for a directional \
                   offset, or two integers separated by a comma for a custom offset. Values \
                   range from -9999 to 9999.",
        };
        let bounded = |part: &str| -> Result<i32, ParseError> {
            let value: i32 = part.trim().parse().map_err(|_| invalid())?;
            if value <= -VALUE_LIMIT || value >= VALUE_LIMIT {
                return Err(invalid());
            }
            Ok(value)
        };
        let parts: Vec<&str> = text.split(',').collect();
        match parts.as_slice() {
            [distance] => Ok(Offset::relative(bounded(distance)?)),
            [x, y] => Ok(Offset::absolute(bounded(x)?, bounded(y)?)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Insets {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        const HINT: &str = "Use one, two, three or four comma separated values from 1 to 9999.";
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::Empty { what: "insets" });
        }
        let values = text
            .split(',')
            .map(|part| bounded_value(part, "insets", HINT))
            .collect::<Result<Vec<i32>, _>>()?;
        match values.as_slice() {
            [all] => Ok(Insets::uniform(*all)),
            [vertical, horizontal] => Ok(Insets::new(*vertical, *horizontal, *vertical, *horizontal)),
            [north, east, south] => Ok(Insets::new(*north, *east, *south, 0)),
            [north, east, south, west] => Ok(Insets::new(*north, *east, *south, *west)),
            _ => Err(ParseError::Invalid {
                text: text.to_string(),
                what: "insets",
                hint: "There are too many values.",
            }),
        }
    }
}

impl FromStr for Closing {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        match text.strip_prefix('^') {
            Some(rest) => Ok(Closing::new(parse_closing_type(rest)?, true)),
            None => Ok(Closing::new(parse_closing_type(text)?, false)),
        }
    }
}

/// Parse `<placement>[/<size>[/<offset>]]`
fn parse_area<'a>(
    placement: Placement,
    mut rest: impl Iterator<Item = &'a str>,
) -> Result<Area, ParseError> {
    let mut area = Area::new(placement, Size::ONE);
    if let Some(size) = rest.next() {
        area.size = size.parse()?;
        if let Some(offset) = rest.next() {
            area.offset = offset.parse()?;
        }
    }
    if rest.next().is_some() {
        return Err(ParseError::Structure("There are too many parameters."));
    }
    if placement.is_random() && !area.offset.is_zero() {
        return Err(ParseError::Structure(
            "You must not set an offset for a random placement.",
        ));
    }
    Ok(area)
}

fn parse_placed_area(text: &str) -> Result<Area, ParseError> {
    let mut parts = text.split('/');
    let placement = parse_placement(parts.next().unwrap_or_default())?;
    parse_area(placement, parts)
}

/// Parse a blank modifier: `<placement>[/<size>[/<offset>]]`
pub fn parse_blank_modifier(text: &str) -> Result<Modifier, ParseError> {
    let area = parse_placed_area(text)?;
    Ok(Modifier::named(ModifierKind::Blank(area), text.trim()))
}

/// Parse a merge modifier: `<placement>[/<size>[/<offset>]]`
pub fn parse_merge_modifier(text: &str) -> Result<Modifier, ParseError> {
    let area = parse_placed_area(text)?;
    Ok(Modifier::named(ModifierKind::Merge(area), text.trim()))
}

/// Parse a frame modifier: `<insets>`
pub fn parse_frame_modifier(text: &str) -> Result<Modifier, ParseError> {
    let insets: Insets = text.parse()?;
    Ok(Modifier::named(ModifierKind::Frame(insets), text.trim()))
}

/// Parse a closing modifier: `[^]<closing>/<placement>[/<size>[/<offset>]]`
pub fn parse_closing_modifier(text: &str) -> Result<Modifier, ParseError> {
    let mut parts = text.split('/');
    let closing: Closing = parts.next().unwrap_or_default().parse()?;
    let Some(placement) = parts.next() else {
        return Err(ParseError::Structure(
            "You must specify at least the closing type and placement parameter.",
        ));
    };
    let placement = parse_placement(placement)?;
    if placement.is_random() {
        return Err(ParseError::Structure("Closings must not be randomly placed."));
    }
    let area = parse_area(placement, parts)?;
    Ok(Modifier::named(
        ModifierKind::Closing(closing, area),
        text.trim(),
    ))
}

impl FromStr for PathEnd {
    type Err = ParseError;

    /// `<placement>[/<offset>[/x]]`, where `x` marks a dead-end
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split('/');
        let placement = parse_placement(parts.next().unwrap_or_default())?;
        let mut path_end = PathEnd::new(placement);
        if let Some(offset) = parts.next() {
            path_end = path_end.with_offset(offset.parse()?);
            if let Some(flag) = parts.next() {
                if !flag.trim().eq_ignore_ascii_case("x") {
                    return Err(ParseError::Structure(
                        "The third parameter must be 'x' for a dead-end or omitted.",
                    ));
                }
                path_end = path_end.dead_end();
            }
        }
        if parts.next().is_some() {
            return Err(ParseError::Structure("There are too many parameters."));
        }
        if placement.is_random() && !path_end.offset.is_zero() {
            return Err(ParseError::Structure(
                "You must not set an offset for a random placement.",
            ));
        }
        Ok(path_end.named(text.trim()))
    }
}
