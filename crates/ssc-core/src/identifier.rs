use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Reason, SyntaxError};
use crate::grammar::{Grammar, FIELDS, LOGIN_PATTERN, SEPARATORS, TECHNOLOGY};
use crate::point::Point;
use crate::validation::Validator;

/// Canonical subscriber login, e.g. `KHARKOV-K13 PON 1/1/04/04:60.1.2`.
///
/// Only built through [`Identifier::parse`] or the composer, so every value
/// is known to be inside its field range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    city: String,
    point: Point,
    address: [u32; 7],
}

impl Identifier {
    pub(crate) fn new(city: String, point: Point, address: [u32; 7]) -> Self {
        Self {
            city,
            point,
            address,
        }
    }

    /// Validate an operator-typed login.
    ///
    /// The input is trimmed and uppercased first. Failures echo the
    /// normalized input, except for empty input which gets the generic
    /// message.
    pub fn parse(raw: &str, grammar: &Grammar) -> Result<Identifier, SyntaxError> {
        let input = raw.trim().to_uppercase();
        if input.is_empty() {
            return Err(SyntaxError::Generic {
                reason: Reason::Empty,
            });
        }

        match Self::parse_normalized(&input, grammar) {
            Ok(id) => Ok(id),
            Err(reason) => Err(SyntaxError::Input { input, reason }),
        }
    }

    fn parse_normalized(input: &str, grammar: &Grammar) -> Result<Identifier, Reason> {
        let caps = LOGIN_PATTERN.captures(input).ok_or(Reason::Malformed)?;

        let city = &caps[1];
        Validator::validate_city(grammar, city)?;
        let point = Validator::validate_point(grammar, &caps[2])?;

        let mut address = [0u32; 7];
        for (i, field) in FIELDS.iter().enumerate() {
            // the pattern bounds every field to at most nine digits
            let value = caps[i + 3].parse::<u64>().map_err(|_| Reason::Malformed)?;
            address[i] = Validator::validate_value(field, value)?;
        }

        Ok(Identifier::new(city.to_string(), point, address))
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// Address values in field order, `opt1` through `opt7`.
    pub fn address(&self) -> &[u32; 7] {
        &self.address
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {} ", self.city, self.point, TECHNOLOGY)?;
        for (i, (field, value)) in FIELDS.iter().zip(self.address).enumerate() {
            if i > 0 {
                f.write_str(SEPARATORS[i - 1])?;
            }
            f.write_str(&field.format(value))?;
        }
        Ok(())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Identifier, SyntaxError> {
        Identifier::parse(raw, &Grammar::default())
    }

    fn message(raw: &str) -> String {
        parse(raw).unwrap_err().to_string()
    }

    #[test]
    fn test_parse_canonical() {
        let id = parse("KHARKOV-K13 PON 1/1/04/04:60.1.2").unwrap();
        assert_eq!(id.city(), "KHARKOV");
        assert_eq!(id.point().to_string(), "K13");
        assert_eq!(id.address(), &[1, 1, 4, 4, 60, 1, 2]);
        assert_eq!(id.to_string(), "KHARKOV-K13 PON 1/1/04/04:60.1.2");
    }

    #[test]
    fn test_canonical_is_idempotent() {
        for login in [
            "KHARKOV-K13 PON 1/1/04/04:60.1.2",
            "KHARKOV-X00 PON 1/1/01/01:1.1.99",
            "KIEV-K99 PON 9/4/20/16:128.8.4094",
            "ODESSA-X01 PON 1/1/01/01:1.1.1",
        ] {
            let id = parse(login).unwrap();
            assert_eq!(id.to_string(), login);
            assert_eq!(parse(&id.to_string()).unwrap(), id);
        }
    }

    #[test]
    fn test_mixed_case_is_uppercased() {
        let id = parse("KHaRKoV-x00 PoN 1/1/01/01:1.1.99").unwrap();
        assert_eq!(id.to_string(), "KHARKOV-X00 PON 1/1/01/01:1.1.99");
        assert_eq!(id, parse("KHARKOV-X00 PON 1/1/01/01:1.1.99").unwrap());
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let id = parse("  kharkov-k13 pon 1/1/04/04:60.1.2\n").unwrap();
        assert_eq!(id.to_string(), "KHARKOV-K13 PON 1/1/04/04:60.1.2");
    }

    #[test]
    fn test_empty_input_is_generic() {
        assert_eq!(message(""), "Error: Incorrect input/Syntax error.");
        assert_eq!(message("   "), "Error: Incorrect input/Syntax error.");
    }

    #[test]
    fn test_errors_echo_uppercased_input() {
        assert_eq!(message("test"), "Error: TEST Incorrect input/Syntax error.");
        assert_eq!(
            message("KHaRKV-k05 PoN 1/1/01/1:01.1.1"),
            "Error: KHARKV-K05 PON 1/1/01/1:01.1.1 Incorrect input/Syntax error."
        );
        assert_eq!(
            message("KHaRKoV-x09 PoN 1/1/01/1:01.1.1"),
            "Error: KHARKOV-X09 PON 1/1/01/1:01.1.1 Incorrect input/Syntax error."
        );
        assert_eq!(
            message("KHaRKoV-x00 1/1/01/1:01.1.1"),
            "Error: KHARKOV-X00 1/1/01/1:01.1.1 Incorrect input/Syntax error."
        );
        assert_eq!(
            message("KHaRKoV-x00 PON 1/1/01/1:1.1"),
            "Error: KHARKOV-X00 PON 1/1/01/1:1.1 Incorrect input/Syntax error."
        );
    }

    #[test]
    fn test_non_latin_input() {
        assert_eq!(
            message("не латин"),
            "Error: НЕ ЛАТИН Incorrect input/Syntax error."
        );
    }

    #[test]
    fn test_zero_segments_are_rejected() {
        let err = parse("KHARKOV-K06 PON 1/1/00/00:0.1.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: KHARKOV-K06 PON 1/1/00/00:0.1.0 Incorrect input/Syntax error."
        );

        let err = parse("KHARKOV-K06 PON 1/1/00/01:1.1.1").unwrap_err();
        assert_eq!(
            err.reason(),
            &Reason::OutOfRange {
                field: "slot",
                value: 0
            }
        );
    }

    #[test]
    fn test_reasons() {
        assert_eq!(parse("test").unwrap_err().reason(), &Reason::Malformed);
        assert_eq!(
            parse("LVIV-K13 PON 1/1/04/04:60.1.2").unwrap_err().reason(),
            &Reason::UnknownCity("LVIV".to_string())
        );
        assert_eq!(
            parse("KHARKOV-Z13 PON 1/1/04/04:60.1.2").unwrap_err().reason(),
            &Reason::InvalidPoint("Z13".to_string())
        );
        assert_eq!(
            parse("KHARKOV-K13 PON 1/1/04/17:60.1.2").unwrap_err().reason(),
            &Reason::OutOfRange {
                field: "port",
                value: 17
            }
        );
        assert_eq!(
            parse("KHARKOV-K13 PON 1/1/04/04:60.1.4095").unwrap_err().reason(),
            &Reason::OutOfRange {
                field: "vlan",
                value: 4095
            }
        );
    }

    #[test]
    fn test_non_canonical_widths_are_rejected() {
        assert!(parse("KHARKOV-K13 PON 1/1/4/04:60.1.2").is_err());
        assert!(parse("KHARKOV-K13 PON 01/1/04/04:60.1.2").is_err());
        assert!(parse("KHARKOV-K13 PON 1/1/04/04:060.1.2").is_err());
        assert!(parse("KHARKOV-K3 PON 1/1/04/04:60.1.2").is_err());
        assert!(parse("KHARKOV-K13  PON 1/1/04/04:60.1.2").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let id = parse("KHARKOV-K13 PON 1/1/04/04:60.1.2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"KHARKOV-K13 PON 1/1/04/04:60.1.2\"");
    }
}
