//! Parsing of the decoder's event dumps: one json object per line, each one being a decoded event.
//!
//! The discriminator is taken out of the object (see [DISCRIMINATOR_KEY]) and every other key becomes an attribute.
//! See also `benches/parsing_strategies.rs` for the trade-offs between extracting the event name first and
//! parsing the whole line straight away.

use std::collections::BTreeMap;
use crate::model::{RawEvent, Value, DISCRIMINATOR_KEY};


/// Transforms a raw dump line into a [RawEvent].\
/// On error, returns a [EventParsingError] describing the problem
pub fn deserialize_event_line(dump_line: &str) -> Result<RawEvent, EventParsingError> {
    if dump_line.trim().is_empty() {
        return Err(EventParsingError::EmptyLine)
    }
    let json: serde_json::Value = serde_json::from_str(dump_line)
        .map_err(|err| EventParsingError::MalformedJson { description: err.to_string() })?;
    let serde_json::Value::Object(object) = json
        else {
            return Err(EventParsingError::NotAnObject)
        };

    let mut name = None;
    let mut attributes = BTreeMap::new();
    for (key, value) in object {
        if key == DISCRIMINATOR_KEY {
            name = value.as_str().map(str::to_string);
        } else {
            attributes.insert(key, Value::from(value));
        }
    }
    name.map(|name| RawEvent::new(name, attributes))
        .ok_or(EventParsingError::MissingDiscriminator)
}

#[derive(Debug, PartialEq)]
pub enum EventParsingError {
    EmptyLine,
    MalformedJson { description: String },
    NotAnObject,
    /// The `_event` key is absent or isn't a string
    MissingDiscriminator,
}
