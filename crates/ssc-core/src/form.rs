use serde::Deserialize;

use crate::composer::OptionSet;
use crate::error::{Reason, SyntaxError};
use crate::grammar::Grammar;
use crate::identifier::Identifier;

/// Which half of the form the operator filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raw,
    Composed,
}

impl Mode {
    /// `raw` or no value at all selects the raw path, `comp` the composed one.
    pub fn from_flag(flag: Option<&str>) -> Result<Mode, SyntaxError> {
        match flag.map(str::trim) {
            None | Some("raw") => Ok(Mode::Raw),
            Some("comp") => Ok(Mode::Composed),
            Some(other) => Err(SyntaxError::Generic {
                reason: Reason::UnknownMode(other.to_string()),
            }),
        }
    }
}

/// Session lookup form as posted by the operator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub login_name: Option<String>,
    #[serde(rename = "type")]
    pub mode: Option<String>,
    pub opt1: Option<String>,
    pub opt2: Option<String>,
    pub opt3: Option<String>,
    pub opt4: Option<String>,
    pub opt5: Option<String>,
    pub opt6: Option<String>,
    pub opt7: Option<String>,
    pub city: Option<String>,
    pub point: Option<String>,
}

impl LoginForm {
    fn option_set(&self) -> OptionSet<'_> {
        OptionSet {
            options: [
                self.opt1.as_deref(),
                self.opt2.as_deref(),
                self.opt3.as_deref(),
                self.opt4.as_deref(),
                self.opt5.as_deref(),
                self.opt6.as_deref(),
                self.opt7.as_deref(),
            ],
            city: self.city.as_deref(),
            point: self.point.as_deref(),
        }
    }

    /// Route the form to the raw parser or the composer.
    pub fn dispatch(&self, grammar: &Grammar) -> Result<Identifier, SyntaxError> {
        match Mode::from_flag(self.mode.as_deref())? {
            Mode::Raw => Identifier::parse(self.login_name.as_deref().unwrap_or_default(), grammar),
            Mode::Composed => self.option_set().compose(grammar),
        }
    }

    /// Canonical login, or the message list shown to the operator.
    pub fn handle(&self, grammar: &Grammar) -> Result<String, Vec<String>> {
        self.dispatch(grammar)
            .map(|id| id.to_string())
            .map_err(SyntaxError::into_messages)
    }
}
