//! Line protocol of the session-management socket service.
//!
//! Request: `<command> user="<operator>" login="<login>"\n`.
//! Response: `key=value` lines closed by `END`, a single `OK`, or
//! `ERROR <text>`.

use ssc_core::Identifier;

use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowSession,
    DeleteSession,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::ShowSession => "show-session",
            Command::DeleteSession => "delete-session",
        }
    }
}

/// A single request to the session service.
#[derive(Debug, Clone)]
pub struct SessionRequest<'a> {
    pub command: Command,
    pub operator: &'a str,
    pub login: &'a Identifier,
}

impl<'a> SessionRequest<'a> {
    pub fn new(command: Command, operator: &'a str, login: &'a Identifier) -> Self {
        Self {
            command,
            operator,
            login,
        }
    }

    /// Encode as one newline-terminated line.
    pub fn encode(&self) -> String {
        format!(
            "{} user=\"{}\" login=\"{}\"\n",
            self.command.as_str(),
            quote(self.operator),
            quote(&self.login.to_string())
        )
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// One line of a session service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseLine {
    Attribute(String, String),
    End,
    Ok,
    Error(String),
}

impl ResponseLine {
    pub fn parse(line: &str) -> Result<ResponseLine, BackendError> {
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            "END" => return Ok(ResponseLine::End),
            "OK" => return Ok(ResponseLine::Ok),
            "ERROR" => return Ok(ResponseLine::Error(String::new())),
            _ => {}
        }
        if let Some(text) = line.strip_prefix("ERROR ") {
            return Ok(ResponseLine::Error(text.trim().to_string()));
        }

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(ResponseLine::Attribute(
                key.trim().to_string(),
                value.trim().to_string(),
            )),
            _ => Err(BackendError::malformed(format!(
                "unexpected session line {:?}",
                line
            ))),
        }
    }
}
