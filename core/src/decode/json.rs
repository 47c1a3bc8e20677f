use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::construct::{FromJson, FromJsonKeyed};
use crate::decode::BodyDecoder;
use crate::error::DecodeError;

fn parse_array(bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(values) => Ok(values),
        _ => Err(DecodeError::NotAnArray),
    }
}

macro_rules! phantom_decoder {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T> {
            _parsed: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            pub fn new() -> Self {
                Self { _parsed: PhantomData }
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>", stringify!($name), type_name::<T>())
            }
        }
    };
}

phantom_decoder! {
    /// Decodes a JSON document into one `T`.
    ObjectDecoder
}

phantom_decoder! {
    /// Decodes a JSON array into the `T`s that could be constructed.
    ArrayDecoder
}

phantom_decoder! {
    /// Decodes a JSON array into a map of `T` keyed by `T::key`.
    KeyedDecoder
}

impl<T: FromJson> BodyDecoder for ObjectDecoder<T> {
    type Parsed = T;
    type Output = T;

    fn decode(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        T::from_json(&value).ok_or(DecodeError::Construct(type_name::<T>()))
    }
}

impl<T: FromJson> BodyDecoder for ArrayDecoder<T> {
    type Parsed = T;
    type Output = Vec<T>;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
        let values = parse_array(bytes)?;
        T::from_json_array(&values).ok_or(DecodeError::Construct(type_name::<Vec<T>>()))
    }
}

impl<T: FromJsonKeyed> BodyDecoder for KeyedDecoder<T> {
    type Parsed = T;
    type Output = HashMap<T::Key, T>;

    fn decode(&self, bytes: &[u8]) -> Result<HashMap<T::Key, T>, DecodeError> {
        let values = parse_array(bytes)?;
        T::from_json_keyed(&values).ok_or(DecodeError::Construct(type_name::<HashMap<T::Key, T>>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Post {
        id: String,
        title: String,
    }

    impl FromJson for Post {
        fn from_json(value: &Value) -> Option<Self> {
            Some(Post {
                id: value.get("id")?.as_str()?.to_string(),
                title: value.get("title")?.as_str()?.to_string(),
            })
        }
    }

    impl FromJsonKeyed for Post {
        type Key = String;

        fn key(&self) -> String {
            self.id.clone()
        }
    }

    /// A type whose batch constructor refuses empty input.
    #[derive(Debug)]
    struct NonEmpty;

    impl FromJson for NonEmpty {
        fn from_json(_: &Value) -> Option<Self> {
            Some(NonEmpty)
        }

        fn from_json_array(values: &[Value]) -> Option<Vec<Self>> {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().map(|_| NonEmpty).collect())
            }
        }
    }

    #[test]
    fn object_decodes() {
        let post = ObjectDecoder::<Post>::new()
            .decode(br#"{"id":"p1","title":"Hello","extra":true}"#)
            .unwrap();
        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn object_malformed_json_fails() {
        let err = ObjectDecoder::<Post>::new().decode(b"{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn object_wrong_shape_fails_with_construct() {
        let err = ObjectDecoder::<Post>::new().decode(br#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Construct(name) if name.ends_with("Post")));
    }

    #[test]
    fn object_empty_body_fails() {
        assert!(ObjectDecoder::<Post>::new().decode_opt(b"").is_none());
    }

    #[test]
    fn array_drops_malformed_elements_and_keeps_order() {
        let body = br#"[
            {"id":"a","title":"first"},
            {"id":"b"},
            {"id":"c","title":"third"},
            42
        ]"#;
        let posts = ArrayDecoder::<Post>::new().decode(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");
        assert_eq!(posts[1].id, "c");
    }

    #[test]
    fn array_rejects_non_array() {
        let err = ArrayDecoder::<Post>::new()
            .decode(br#"{"id":"a","title":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn array_batch_constructor_can_refuse() {
        let err = ArrayDecoder::<NonEmpty>::new().decode(b"[]").unwrap_err();
        assert!(matches!(err, DecodeError::Construct(_)));
        assert_eq!(ArrayDecoder::<NonEmpty>::new().decode(b"[1,2]").unwrap().len(), 2);
    }

    #[test]
    fn keyed_maps_by_key_and_drops_malformed() {
        let body = br#"[{"id":"a","title":"A"},{"title":"orphan"},{"id":"b","title":"B"}]"#;
        let posts = KeyedDecoder::<Post>::new().decode(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts["a"].title, "A");
        assert_eq!(posts["b"].title, "B");
    }

    #[test]
    fn keyed_rejects_non_array() {
        assert!(matches!(
            KeyedDecoder::<Post>::new().decode(b"\"text\"").unwrap_err(),
            DecodeError::NotAnArray
        ));
    }

    #[test]
    fn debug_names_the_parsed_type() {
        let dbg = format!("{:?}", ArrayDecoder::<Post>::new());
        assert!(dbg.starts_with("ArrayDecoder<"));
        assert!(dbg.ends_with("Post>"));
    }
}
