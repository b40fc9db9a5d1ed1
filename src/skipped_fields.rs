//! Finds the struct fields that a `Serialize` impl declares but leaves
//! out, such as those behind `#[serde(skip_serializing_if = "...")]`.

use serde::ser::{self, Impossible, Serialize, SerializeStruct, Serializer};
use std::fmt::Display;
use thiserror::Error;

/// Returns the names of the fields `value` skipped while serializing
/// itself as a struct. Anything that is not a struct skips nothing.
pub(crate) fn skipped_fields<T: Serialize + ?Sized>(value: &T) -> Vec<&'static str> {
    value.serialize(SkippedFields).unwrap_or_default()
}

#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct NotAStruct(String);

impl ser::Error for NotAStruct {
    fn custom<T: Display>(msg: T) -> Self {
        NotAStruct(msg.to_string())
    }
}

type Skipped = Vec<&'static str>;

struct SkippedFields;

struct StructFields {
    skipped: Skipped,
}

impl SerializeStruct for StructFields {
    type Ok = Skipped;
    type Error = NotAStruct;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), NotAStruct> {
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), NotAStruct> {
        self.skipped.push(key);
        Ok(())
    }

    fn end(self) -> Result<Skipped, NotAStruct> {
        Ok(self.skipped)
    }
}

macro_rules! not_a_struct {
    ($($method:ident($($arg:ty),*)),* $(,)?) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Skipped, NotAStruct> {
                Err(NotAStruct(stringify!($method).to_string()))
            }
        )*
    };
}

impl Serializer for SkippedFields {
    type Ok = Skipped;
    type Error = NotAStruct;
    type SerializeSeq = Impossible<Skipped, NotAStruct>;
    type SerializeTuple = Impossible<Skipped, NotAStruct>;
    type SerializeTupleStruct = Impossible<Skipped, NotAStruct>;
    type SerializeTupleVariant = Impossible<Skipped, NotAStruct>;
    type SerializeMap = Impossible<Skipped, NotAStruct>;
    type SerializeStruct = StructFields;
    type SerializeStructVariant = Impossible<Skipped, NotAStruct>;

    not_a_struct! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_none(),
        serialize_unit(),
        serialize_unit_struct(&'static str),
        serialize_unit_variant(&'static str, u32, &'static str),
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Skipped, NotAStruct> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Skipped, NotAStruct> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Skipped, NotAStruct> {
        Err(NotAStruct("serialize_newtype_variant".to_string()))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NotAStruct> {
        Err(NotAStruct("serialize_seq".to_string()))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NotAStruct> {
        Err(NotAStruct("serialize_tuple".to_string()))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, NotAStruct> {
        Err(NotAStruct("serialize_tuple_struct".to_string()))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NotAStruct> {
        Err(NotAStruct("serialize_tuple_variant".to_string()))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NotAStruct> {
        Err(NotAStruct("serialize_map".to_string()))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, NotAStruct> {
        Ok(StructFields {
            skipped: Vec::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NotAStruct> {
        Err(NotAStruct("serialize_struct_variant".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Profile {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
        #[serde(skip)]
        #[allow(dead_code)]
        cache: u8,
    }

    #[test]
    fn reports_conditionally_skipped_fields_only() {
        let profile = Profile {
            name: "ann".into(),
            nickname: None,
            cache: 0,
        };
        assert_eq!(vec!["nickname"], skipped_fields(&profile));

        let profile = Profile {
            nickname: Some("a".into()),
            ..profile
        };
        assert!(skipped_fields(&profile).is_empty());
    }

    #[test]
    fn non_structs_skip_nothing() {
        assert!(skipped_fields(&3).is_empty());
        assert!(skipped_fields(&vec![1, 2]).is_empty());
    }
}
