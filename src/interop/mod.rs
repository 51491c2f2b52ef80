//! Conversions between [`Value`] and the `serde` ecosystem.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number};

use crate::value::{Data, Value};
use crate::{Error, Result};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.data() {
            Data::String(text) => serializer.serialize_str(text),
            Data::Number(n) => serializer.serialize_f64(*n),
            Data::True => serializer.serialize_bool(true),
            Data::False => serializer.serialize_bool(false),
            Data::Null => serializer.serialize_unit(),
            Data::Object(table) => {
                let table = table.borrow();
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (key, member) in table.iter() {
                    map.serialize_entry(key.as_str(), member)?;
                }
                map.end()
            }
            Data::Array(items) => {
                let items = items.borrow();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

/// Deep copy out of a `serde_json::Value`. Fails only when a container
/// cannot grow.
impl TryFrom<&serde_json::Value> for Value {
    type Error = Error;

    fn try_from(json: &serde_json::Value) -> Result<Self> {
        Ok(match json {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::boolean(*b),
            serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::string(s.as_str()),
            serde_json::Value::Array(items) => {
                let array = Value::array();
                for item in items {
                    array.push(Value::try_from(item)?)?;
                }
                array
            }
            serde_json::Value::Object(members) => {
                let object = Value::object();
                for (key, member) in members {
                    object.set(key.as_str(), Value::try_from(member)?)?;
                }
                object
            }
        })
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        Value::try_from(&json)
    }
}

impl Value {
    /// Deep copy into a `serde_json::Value`. Non-finite numbers become
    /// `Null`; integral numbers within `i64` range become integers.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self.data() {
            Data::String(text) => serde_json::Value::String(text.to_string()),
            Data::Number(n) => json_number(*n),
            Data::True => serde_json::Value::Bool(true),
            Data::False => serde_json::Value::Bool(false),
            Data::Null => serde_json::Value::Null,
            Data::Object(table) => serde_json::Value::Object(
                table
                    .borrow()
                    .iter()
                    .map(|(key, member)| (key.to_string(), member.to_json_value()))
                    .collect::<Map<String, serde_json::Value>>(),
            ),
            Data::Array(items) => serde_json::Value::Array(
                items.borrow().iter().map(Value::to_json_value).collect(),
            ),
        }
    }
}

fn json_number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
