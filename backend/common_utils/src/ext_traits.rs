//! Extension traits over foreign types

use error_stack::ResultExt;
use serde::de::DeserializeOwned;

use crate::errors::{CustomResult, ParsingError};

pub trait ByteSliceExt {
    /// Convert a JSON byte slice into the given struct
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;

    /// Convert a form-urlencoded byte slice into the given struct
    fn parse_form<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!(
                    "Unable to parse {type_name} from bytes {:?}",
                    String::from_utf8_lossy(self)
                )
            })
    }

    fn parse_form<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_urlencoded::from_bytes(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!(
                    "Unable to parse {type_name} from form body {:?}",
                    String::from_utf8_lossy(self)
                )
            })
    }
}
