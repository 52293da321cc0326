//! YAML control loader.
//!
//! A control file holds exactly one YAML document whose top level is a
//! mapping. YAML is deserialized into `serde_json::Value` so both formats
//! share one document shape.
//!
//! Loading follows what YAML allows rather than what JSON allows: a repeated
//! key keeps its last value, and keys need not be strings. Only string keys
//! can name a field, so non-string keys are dropped from the top level and
//! written out as text in nested mappings.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use serde_saphyr::{DuplicateKeyPolicy, Options};

use crate::error::{CheckError, CheckErrorKind};
use crate::format::{Document, into_document};

/// A mapping key as written in the YAML source.
enum MappingKey {
    /// A string scalar: the only kind of key that can name a field.
    Text(String),
    /// A null, boolean or numeric scalar, rendered as text.
    Other(String),
}

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MappingKeyVisitor)
    }
}

struct MappingKeyVisitor;

impl Visitor<'_> for MappingKeyVisitor {
    type Value = MappingKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MappingKey, E> {
        Ok(MappingKey::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MappingKey, E> {
        Ok(MappingKey::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MappingKey, E> {
        Ok(MappingKey::Other(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MappingKey, E> {
        Ok(MappingKey::Other("null".to_owned()))
    }

    fn visit_none<E: de::Error>(self) -> Result<MappingKey, E> {
        self.visit_unit()
    }
}

/// Builds a `serde_json::Value` from any YAML node.
#[derive(Clone, Copy)]
struct YamlValue {
    top_level: bool,
}

const NESTED: YamlValue = YamlValue { top_level: false };

impl<'de> DeserializeSeed<'de> for YamlValue {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for YamlValue {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Ok(u64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    // `.nan` and `.inf` have no JSON number form.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or_else(|| Value::String(v.to_string()), Value::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        self.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(NESTED)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut out = Map::new();
        while let Some(key) = map.next_key::<MappingKey>()? {
            let name = match key {
                MappingKey::Text(name) => name,
                MappingKey::Other(name) => {
                    if self.top_level {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    name
                }
            };
            // Duplicates arrive in source order, so the last one stays.
            out.insert(name, map.next_value_seed(NESTED)?);
        }
        Ok(Value::Object(out))
    }
}

/// One YAML document, loaded with [`YamlValue`] at the top level.
struct YamlDocument(Value);

impl<'de> Deserialize<'de> for YamlDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        YamlValue { top_level: true }
            .deserialize(deserializer)
            .map(Self)
    }
}

/// Parse YAML content into a [`Document`].
///
/// # Errors
///
/// Returns a [`CheckError`] if the content is not valid YAML, holds zero or
/// several documents, or its top-level value is not a mapping.
pub fn parse_yaml_document(content: &str) -> Result<Document, CheckError> {
    let options = Options {
        duplicate_keys: DuplicateKeyPolicy::LastWins,
        ..Options::default()
    };
    let mut documents: Vec<YamlDocument> =
        serde_saphyr::from_multiple_with_options(content, options).map_err(|e| {
            CheckError::new(CheckErrorKind::YamlParse, format!("YAML parse error: {e}"))
        })?;

    match documents.len() {
        0 => Err(CheckError::new(
            CheckErrorKind::EmptyDocument,
            "file contains no YAML document",
        )),
        1 => into_document(documents.remove(0).0),
        n => Err(CheckError::new(
            CheckErrorKind::MultipleDocuments,
            format!("expected a single YAML document, found {n}"),
        )),
    }
}
