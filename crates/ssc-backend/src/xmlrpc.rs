//! Minimal XML-RPC codec: encode a `methodCall`, decode a `methodResponse`.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::BackendError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    Double(f64),
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
    Nil,
}

impl Value {
    /// Scalar values as text; `None` for arrays, structs and nil.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Double(d) => Some(d.to_string()),
            Value::Array(_) | Value::Struct(_) | Value::Nil => None,
        }
    }

    fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Build the request body for a call.
pub fn method_call(method: &str, params: &[Value]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0"?><methodCall><methodName>"#);
    xml.push_str(&escape(method));
    xml.push_str("</methodName><params>");
    for param in params {
        xml.push_str("<param>");
        encode_value(param, &mut xml);
        xml.push_str("</param>");
    }
    xml.push_str("</params></methodCall>");
    xml
}

fn encode_value(value: &Value, xml: &mut String) {
    xml.push_str("<value>");
    match value {
        Value::String(s) => {
            xml.push_str("<string>");
            xml.push_str(&escape(s.as_str()));
            xml.push_str("</string>");
        }
        Value::Int(i) => xml.push_str(&format!("<int>{}</int>", i)),
        Value::Bool(b) => xml.push_str(&format!("<boolean>{}</boolean>", u8::from(*b))),
        Value::Double(d) => xml.push_str(&format!("<double>{}</double>", d)),
        Value::Array(items) => {
            xml.push_str("<array><data>");
            for item in items {
                encode_value(item, xml);
            }
            xml.push_str("</data></array>");
        }
        Value::Struct(members) => {
            xml.push_str("<struct>");
            for (name, member) in members {
                xml.push_str("<member><name>");
                xml.push_str(&escape(name.as_str()));
                xml.push_str("</name>");
                encode_value(member, xml);
                xml.push_str("</member>");
            }
            xml.push_str("</struct>");
        }
        Value::Nil => xml.push_str("<nil/>"),
    }
    xml.push_str("</value>");
}

/// Decode a `methodResponse` into its single return value.
/// A `<fault>` becomes [`BackendError::Fault`].
pub fn parse_response(xml: &str) -> Result<Value, BackendError> {
    let root = parse_tree(xml)?;
    if root.name != "methodResponse" {
        return Err(BackendError::malformed(format!(
            "expected methodResponse, got {}",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = decode_value(required(fault.child("value"), "fault value")?)?;
        let code = match value.member("faultCode") {
            Some(Value::Int(code)) => *code,
            _ => 0,
        };
        let message = value
            .member("faultString")
            .and_then(Value::as_text)
            .unwrap_or_default();
        return Err(BackendError::Fault { code, message });
    }

    let value = root
        .child("params")
        .and_then(|p| p.child("param"))
        .and_then(|p| p.child("value"));
    decode_value(required(value, "params/param/value")?)
}

fn required<'a>(el: Option<&'a Element>, what: &str) -> Result<&'a Element, BackendError> {
    el.ok_or_else(|| BackendError::malformed(format!("missing {}", what)))
}

fn decode_value(el: &Element) -> Result<Value, BackendError> {
    let Some(inner) = el.children.first() else {
        // untyped values are strings
        return Ok(Value::String(el.text.clone()));
    };

    let text = inner.text.trim();
    match inner.name.as_str() {
        "string" => Ok(Value::String(inner.text.clone())),
        "int" | "i4" | "i8" => text
            .parse()
            .map(Value::Int)
            .map_err(|_| BackendError::malformed(format!("bad integer {:?}", text))),
        "boolean" => match text {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            _ => Err(BackendError::malformed(format!("bad boolean {:?}", text))),
        },
        "double" => text
            .parse()
            .map(Value::Double)
            .map_err(|_| BackendError::malformed(format!("bad double {:?}", text))),
        "nil" => Ok(Value::Nil),
        "array" => {
            let data = required(inner.child("data"), "array data")?;
            data.children
                .iter()
                .filter(|c| c.name == "value")
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "struct" => {
            let mut members = Vec::new();
            for member in inner.children.iter().filter(|c| c.name == "member") {
                let name = required(member.child("name"), "member name")?.text.trim().to_string();
                let value = decode_value(required(member.child("value"), "member value")?)?;
                members.push((name, value));
            }
            Ok(Value::Struct(members))
        }
        other => Err(BackendError::malformed(format!("unknown value type {}", other))),
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, BackendError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(BackendError::malformed)?
            .to_string();
        Ok(Element {
            name,
            ..Element::default()
        })
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

fn parse_tree(xml: &str) -> Result<Element, BackendError> {
    // Text is kept verbatim. Whitespace between elements lands in container
    // text, which the decoder never reads.
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    loop {
        let closed = match reader.read_event().map_err(BackendError::malformed)? {
            Event::Start(start) => {
                stack.push(Element::open(&start)?);
                continue;
            }
            Event::Empty(start) => Element::open(&start)?,
            Event::End(_) => stack
                .pop()
                .ok_or_else(|| BackendError::malformed("unbalanced end tag"))?,
            Event::Text(text) => {
                let text = text.unescape().map_err(BackendError::malformed)?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
                continue;
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                continue;
            }
            Event::Eof => return Err(BackendError::malformed("unexpected end of document")),
            _ => continue,
        };

        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => return Ok(closed),
        }
    }
}
