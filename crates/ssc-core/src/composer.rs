use crate::error::{Reason, SyntaxError};
use crate::grammar::{Grammar, FIELDS};
use crate::identifier::Identifier;
use crate::validation::Validator;

/// The option fields of the composed form, as typed.
#[derive(Debug, Clone, Default)]
pub struct OptionSet<'a> {
    pub options: [Option<&'a str>; 7],
    pub city: Option<&'a str>,
    pub point: Option<&'a str>,
}

impl OptionSet<'_> {
    /// Build a canonical identifier from the option fields.
    ///
    /// Errors are always generic; field content is never echoed.
    pub fn compose(&self, grammar: &Grammar) -> Result<Identifier, SyntaxError> {
        self.compose_inner(grammar)
            .map_err(|reason| SyntaxError::Generic { reason })
    }

    fn compose_inner(&self, grammar: &Grammar) -> Result<Identifier, Reason> {
        let city = normalize(self.city);
        Validator::validate_city(grammar, &city)?;
        let point = Validator::validate_point(grammar, &normalize(self.point))?;

        let mut address = [0u32; 7];
        for (i, field) in FIELDS.iter().enumerate() {
            address[i] = Validator::validate_option(field, self.options[i])?;
        }

        Ok(Identifier::new(city, point, address))
    }
}

fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_uppercase()).unwrap_or_default()
}
