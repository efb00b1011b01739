use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Cities accepted when no explicit list is configured.
pub const DEFAULT_CITIES: [&str; 5] = ["KHARKOV", "KIEV", "DNEPR", "ODESSA", "ZAPOROZHYE"];

/// Access-node kind letters.
pub const NODE_KINDS: [char; 2] = ['K', 'X'];

/// Literal technology tag between the point and the address.
pub const TECHNOLOGY: &str = "PON";

/// How a field is written in the canonical identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// Zero padded to exactly this many digits.
    Fixed(usize),
    /// As many digits as needed, no leading zeros.
    Free,
}

/// One numeric address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub width: Width,
}

impl FieldSpec {
    const fn new(name: &'static str, min: u32, max: u32, width: Width) -> Self {
        Self {
            name,
            min,
            max,
            width,
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        (u64::from(self.min)..=u64::from(self.max)).contains(&value)
    }

    /// Render a value at canonical width.
    pub fn format(&self, value: u32) -> String {
        match self.width {
            Width::Fixed(digits) => format!("{:0width$}", value, width = digits),
            Width::Free => value.to_string(),
        }
    }

    fn pattern(&self) -> String {
        match self.width {
            Width::Fixed(digits) => format!("([0-9]{{{}}})", digits),
            Width::Free => "([1-9][0-9]{0,8})".to_string(),
        }
    }
}

/// Address fields in the order they appear, `opt1` through `opt7`.
pub const FIELDS: [FieldSpec; 7] = [
    FieldSpec::new("frame", 1, 9, Width::Fixed(1)),
    FieldSpec::new("shelf", 1, 4, Width::Fixed(1)),
    FieldSpec::new("slot", 1, 20, Width::Fixed(2)),
    FieldSpec::new("port", 1, 16, Width::Fixed(2)),
    FieldSpec::new("onu", 1, 128, Width::Free),
    FieldSpec::new("uni", 1, 8, Width::Free),
    FieldSpec::new("vlan", 1, 4094, Width::Free),
];

/// Text written before each address field after the first.
pub const SEPARATORS: [&str; 6] = ["/", "/", "/", ":", ".", "."];

/// Structural pattern for an uppercased login. Captures the city, the point
/// and each address field; membership and ranges are checked afterwards.
pub(crate) static LOGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut pattern = format!("^([A-Z]+)-([A-Z][0-9]{{2}}) {} ", TECHNOLOGY);
    for (i, field) in FIELDS.iter().enumerate() {
        if i > 0 {
            pattern.push_str(&regex::escape(SEPARATORS[i - 1]));
        }
        pattern.push_str(&field.pattern());
    }
    pattern.push('$');
    Regex::new(&pattern).expect("login pattern is a valid regex")
});

#[derive(Error, Debug, PartialEq)]
pub enum GrammarError {
    #[error("City list cannot be empty")]
    NoCities,

    #[error("Invalid city name {0:?}: only latin letters are allowed")]
    InvalidCity(String),
}

/// The login grammar: which cities exist, plus the fixed field table.
#[derive(Debug, Clone, Serialize)]
pub struct Grammar {
    cities: Vec<String>,
    node_kinds: Vec<char>,
    fields: Vec<FieldSpec>,
}

impl Grammar {
    /// Build a grammar for the given cities. Names are uppercased.
    pub fn new<I, S>(cities: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = Vec::new();
        for city in cities {
            let city = city.as_ref().trim().to_uppercase();
            if city.is_empty() || !city.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(GrammarError::InvalidCity(city));
            }
            if !names.contains(&city) {
                names.push(city);
            }
        }
        if names.is_empty() {
            return Err(GrammarError::NoCities);
        }

        Ok(Self {
            cities: names,
            node_kinds: NODE_KINDS.to_vec(),
            fields: FIELDS.to_vec(),
        })
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn node_kinds(&self) -> &[char] {
        &self.node_kinds
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_city(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            node_kinds: NODE_KINDS.to_vec(),
            fields: FIELDS.to_vec(),
        }
    }
}
