//! Strict decoding of response bodies into typed results.
//!
//! A body either decodes fully into the expected shape or yields a
//! [`DecodeError`]; partially populated results are never produced. The
//! lenient, field-by-field reading used for token payloads lives on
//! [`Token`](crate::management::Token) and is not used here.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::{
    error::DecodeError,
    spotify::{LibraryItem, SearchItem},
    types::{Paging, SavedItem},
};

pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(data).map_err(DecodeError::from)
}

pub fn decode_page<T: DeserializeOwned>(data: &[u8]) -> Result<Paging<T>, DecodeError> {
    decode(data)
}

/// Unwraps `{"<plural>": {"items": [...]}}` into the item sequence.
pub fn decode_search<T: SearchItem>(data: &[u8]) -> Result<Vec<T>, DecodeError> {
    let key = T::KIND.plural();
    let mut envelope: HashMap<String, Paging<T>> = decode(data)?;
    envelope
        .remove(key)
        .map(|page| page.items)
        .ok_or(DecodeError::MissingEnvelope(key))
}

/// Unwraps a library listing, stripping the saved-item wrapper where the kind has one.
pub fn decode_library<T: LibraryItem>(data: &[u8]) -> Result<Vec<T>, DecodeError> {
    if T::SAVED_WRAPPER {
        let page: Paging<SavedItem<T>> = decode(data)?;
        Ok(page.items.into_iter().map(|saved| saved.item).collect())
    } else {
        let page: Paging<T> = decode(data)?;
        Ok(page.items)
    }
}

/// Reads the first flag of a `contains` answer such as `[true]`.
pub fn decode_contains(data: &[u8]) -> Result<bool, DecodeError> {
    let flags: Vec<bool> = decode(data)?;
    flags.first().copied().ok_or(DecodeError::Empty)
}
