use crate::error::Reason;
use crate::grammar::{FieldSpec, Grammar};
use crate::point::Point;

/// Field-level checks shared by the raw and composed paths.
pub struct Validator;

impl Validator {
    /// Validate an uppercase city name against the configured set.
    pub fn validate_city(grammar: &Grammar, city: &str) -> Result<(), Reason> {
        if city.is_empty() {
            return Err(Reason::MissingField("city"));
        }
        if !grammar.is_city(city) {
            return Err(Reason::UnknownCity(city.to_string()));
        }
        Ok(())
    }

    /// Validate an uppercase point code.
    pub fn validate_point(grammar: &Grammar, point: &str) -> Result<Point, Reason> {
        if point.is_empty() {
            return Err(Reason::MissingField("point"));
        }
        Point::parse(point, grammar.node_kinds())
            .ok_or_else(|| Reason::InvalidPoint(point.to_string()))
    }

    /// Check a numeric value against its field range.
    pub fn validate_value(field: &FieldSpec, value: u64) -> Result<u32, Reason> {
        if !field.contains(value) {
            return Err(Reason::OutOfRange {
                field: field.name,
                value,
            });
        }
        // contains() bounds the value by a u32 maximum
        Ok(value as u32)
    }

    /// Parse an option field as typed in the form.
    /// Must be non-empty ASCII digits; leading zeros are allowed.
    pub fn validate_option(field: &FieldSpec, raw: Option<&str>) -> Result<u32, Reason> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(Reason::MissingField(field.name));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Reason::NotNumeric(field.name));
        }
        let value = raw.parse::<u64>().map_err(|_| Reason::OutOfRange {
            field: field.name,
            value: u64::MAX,
        })?;
        Self::validate_value(field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::FIELDS;

    #[test]
    fn test_valid_city() {
        let grammar = Grammar::default();
        assert!(Validator::validate_city(&grammar, "KHARKOV").is_ok());
        assert!(Validator::validate_city(&grammar, "KIEV").is_ok());
    }

    #[test]
    fn test_invalid_city() {
        let grammar = Grammar::default();
        assert_eq!(
            Validator::validate_city(&grammar, ""),
            Err(Reason::MissingField("city"))
        );
        assert_eq!(
            Validator::validate_city(&grammar, "KHARKV"),
            Err(Reason::UnknownCity("KHARKV".to_string()))
        );
    }

    #[test]
    fn test_point() {
        let grammar = Grammar::default();
        assert!(Validator::validate_point(&grammar, "K13").is_ok());
        assert_eq!(
            Validator::validate_point(&grammar, ""),
            Err(Reason::MissingField("point"))
        );
        assert!(Validator::validate_point(&grammar, "Z13").is_err());
    }

    #[test]
    fn test_valid_option() {
        assert_eq!(Validator::validate_option(&FIELDS[0], Some("1")), Ok(1));
        assert_eq!(Validator::validate_option(&FIELDS[0], Some("001")), Ok(1));
        assert_eq!(Validator::validate_option(&FIELDS[4], Some("0060")), Ok(60));
        assert_eq!(Validator::validate_option(&FIELDS[6], Some(" 99 ")), Ok(99));
    }

    #[test]
    fn test_invalid_option() {
        assert_eq!(
            Validator::validate_option(&FIELDS[0], None),
            Err(Reason::MissingField("frame"))
        );
        assert_eq!(
            Validator::validate_option(&FIELDS[0], Some("")),
            Err(Reason::MissingField("frame"))
        );
        assert_eq!(
            Validator::validate_option(&FIELDS[0], Some("err_val")),
            Err(Reason::NotNumeric("frame"))
        );
        assert_eq!(
            Validator::validate_option(&FIELDS[0], Some("-1")),
            Err(Reason::NotNumeric("frame"))
        );
        assert_eq!(
            Validator::validate_option(&FIELDS[2], Some("0")),
            Err(Reason::OutOfRange {
                field: "slot",
                value: 0
            })
        );
        assert!(Validator::validate_option(&FIELDS[6], Some("4095")).is_err());
        assert!(Validator::validate_option(&FIELDS[6], Some("99999999999999999999999")).is_err());
    }
}
