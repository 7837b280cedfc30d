//! Response body decoding.

use serde::de::value::MapDeserializer;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Decodes a complete response body into `T`.
///
/// The whole body must be one JSON value; trailing data is rejected. On any
/// field-level failure nothing is returned but the error.
///
/// # Arguments
///
/// * `body` - The raw response body.
///
/// # Returns
///
/// * `anyhow::Result<T>` - The decoded value, or the `serde_json::Error`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> anyhow::Result<T> {
    let value = serde_json::from_slice(body)?;
    Ok(value)
}

/// Deserializes a JSON `null` as `T::default()`.
///
/// Used with `#[serde(deserialize_with = "...")]` on string and collection
/// fields that upstream sometimes sends as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wraps a deserializer so that a struct only accepts a JSON object.
///
/// Derived struct deserializers also accept a JSON array and fill the fields
/// positionally. Upstream never sends arrays for an entity, so those are
/// rejected. A `null` entity yields the struct's defaults.
pub struct ObjectOnly<D>(pub D);

impl<'de, D: Deserializer<'de>> Deserializer<'de> for ObjectOnly<D> {
    type Error = D::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, D::Error> {
        self.0.deserialize_any(MapOnly(visitor))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, D::Error> {
        self.0.deserialize_option(StructOrNull {
            name,
            fields,
            visitor,
        })
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Passes only maps through to the wrapped visitor.
struct MapOnly<V>(V);

impl<'de, V: Visitor<'de>> Visitor<'de> for MapOnly<V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.expecting(f)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        self.0.visit_map(map)
    }
}

struct StructOrNull<V> {
    name: &'static str,
    fields: &'static [&'static str],
    visitor: V,
}

impl<V> StructOrNull<V> {
    fn empty<'de, E: de::Error>(self) -> Result<V::Value, E>
    where
        V: Visitor<'de>,
    {
        self.visitor
            .visit_map(MapDeserializer::<_, E>::new(std::iter::empty::<((), ())>()))
    }
}

impl<'de, V: Visitor<'de>> Visitor<'de> for StructOrNull<V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.visitor.expecting(f)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.empty()
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        self.empty()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_struct(self.name, self.fields, MapOnly(self.visitor))
    }
}

/// Implements `Deserialize` through [`ObjectOnly`] and `Serialize` for model
/// structs declared with `#[serde(remote = "Self")]`.
macro_rules! json_object {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> Result<Self, D::Error> {
                    $ty::deserialize($crate::decode::ObjectOnly(deserializer))
                }
            }

            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    $ty::serialize(self, serializer)
                }
            }
        )*
    };
}

pub(crate) use json_object;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    json_object!(Sample);

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    #[serde(default, remote = "Self")]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn test_decode_body() {
        let sample: Sample = decode_body(br#"{"name": "a", "items": [3, 1, 2]}"#).unwrap();
        assert_eq!(sample.name, "a");
        assert_eq!(sample.items, vec![3, 1, 2]);
    }

    #[test]
    fn test_nulls_become_defaults() {
        let sample: Sample = decode_body(br#"{"name": null, "items": null}"#).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_missing_fields_become_defaults() {
        let sample: Sample = decode_body(b"{}").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_rejects_non_json() {
        let result: anyhow::Result<Sample> = decode_body(b"not JSON");
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn test_rejects_trailing_data() {
        let result: anyhow::Result<Sample> = decode_body(br#"{"name": "a"} {"name": "b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_error_fails_whole_decode() {
        let result: anyhow::Result<Sample> = decode_body(br#"{"name": "a", "items": ["x"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_array_as_struct() {
        let empty: anyhow::Result<Sample> = decode_body(b"[]");
        assert!(empty.is_err());

        let positional: anyhow::Result<Sample> = decode_body(br#"["a", [1]]"#);
        assert!(positional.is_err());
    }

    #[test]
    fn test_null_struct_is_default() {
        let sample: Sample = decode_body(b"null").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_rejects_scalar_as_struct() {
        assert!(decode_body::<Sample>(b"42").is_err());
        assert!(decode_body::<Sample>(br#""a""#).is_err());
    }

    #[test]
    fn test_serialize_goes_through_derived_impl() {
        let sample = Sample {
            name: "a".to_string(),
            items: vec![1],
        };
        assert_eq!(
            serde_json::to_string(&sample).unwrap(),
            r#"{"name":"a","items":[1]}"#
        );
    }
}
