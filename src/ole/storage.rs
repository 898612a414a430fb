//! Decoding of the OLEDS streams found in one object storage.
//!
//! The compound-file container itself is not decoded here. Callers hand over
//! anything that can list and open streams by name through [`StreamSource`].

use super::compobj::CompObjStream;
use super::consts::{
    COMPOBJ_STREAM_NAME, MAX_PRESENTATION_STREAM_INDEX, NATIVE_STREAM_NAME, OLE_STREAM_NAME,
    PRESENTATION_STREAM_PREFIX,
};
use super::native::OleNativeStream;
use super::ole_stream::OleStream;
use super::options::DecodeOptions;
use super::presentation_stream::OlePresentationStream;
use super::record::StreamRecord;
use crate::common::Result;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Named streams of a single object storage.
pub trait StreamSource {
    /// Names of the streams directly inside the storage.
    fn stream_names(&self) -> Vec<String>;

    /// Contents of the stream called `name`, or `None` if it does not exist.
    /// The declared length of the stream is the length of the returned bytes.
    fn open_stream(&mut self, name: &str) -> Option<Cow<'_, [u8]>>;
}

impl StreamSource for HashMap<String, Vec<u8>> {
    fn stream_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn open_stream(&mut self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|data| Cow::Borrowed(data.as_slice()))
    }
}

impl StreamSource for BTreeMap<String, Vec<u8>> {
    fn stream_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn open_stream(&mut self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|data| Cow::Borrowed(data.as_slice()))
    }
}

/// Name of the presentation stream with the given index, `"\x02OlePres000"`
/// through `"\x02OlePres999"`.
pub fn presentation_stream_name(index: u16) -> Option<String> {
    (index <= MAX_PRESENTATION_STREAM_INDEX)
        .then(|| format!("{}{:03}", PRESENTATION_STREAM_PREFIX, index))
}

/// Index of a presentation stream name, or `None` for any other name.
pub fn parse_presentation_stream_index(name: &str) -> Option<u16> {
    let digits = name.strip_prefix(PRESENTATION_STREAM_PREFIX)?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Every OLEDS record decoded from one object storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectStorage {
    pub ole: Option<OleStream>,
    pub comp_obj: Option<CompObjStream>,
    pub native: Option<OleNativeStream>,
    /// Presentation streams with their index, in ascending index order
    pub presentations: Vec<(u16, OlePresentationStream)>,
}

fn load_stream<S, R>(source: &mut S, name: &str, options: &DecodeOptions) -> Result<Option<R>>
where
    S: StreamSource + ?Sized,
    R: StreamRecord,
{
    match source.open_stream(name) {
        Some(data) => R::parse_with_options(&data, data.len(), options).map(Some),
        None => Ok(None),
    }
}

impl ObjectStorage {
    /// Decode the storage with default options.
    pub fn load<S: StreamSource + ?Sized>(source: &mut S) -> Result<Self> {
        Self::load_with_options(source, &DecodeOptions::default())
    }

    /// Decode the storage. Missing streams are left empty; a stream that is
    /// present but malformed fails the whole load.
    pub fn load_with_options<S: StreamSource + ?Sized>(
        source: &mut S,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let ole = load_stream(source, OLE_STREAM_NAME, options)?;
        let comp_obj = load_stream(source, COMPOBJ_STREAM_NAME, options)?;
        let native = load_stream(source, NATIVE_STREAM_NAME, options)?;

        let mut indices: Vec<(u16, String)> = source
            .stream_names()
            .into_iter()
            .filter_map(|name| parse_presentation_stream_index(&name).map(|index| (index, name)))
            .collect();
        indices.sort_unstable();

        let mut presentations = Vec::with_capacity(indices.len());
        for (index, name) in indices {
            if let Some(stream) = load_stream(source, &name, options)? {
                presentations.push((index, stream));
            }
        }
        debug!(
            "Loaded object storage: OLEStream {}, CompObj {}, native {}, {} presentation stream(s)",
            ole.is_some(),
            comp_obj.is_some(),
            native.is_some(),
            presentations.len()
        );

        Ok(Self {
            ole,
            comp_obj,
            native,
            presentations,
        })
    }

    /// Whether the storage holds a linked object.
    pub fn is_linked(&self) -> bool {
        self.ole.as_ref().is_some_and(OleStream::is_linked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::compobj::tests::word_compobj_bytes;
    use crate::ole::ole_stream::tests::EMBEDDED;
    use crate::ole::presentation_stream::tests::presentation_stream_bytes;

    fn storage() -> BTreeMap<String, Vec<u8>> {
        let mut streams = BTreeMap::new();
        streams.insert(OLE_STREAM_NAME.to_string(), EMBEDDED.to_vec());
        streams.insert(COMPOBJ_STREAM_NAME.to_string(), word_compobj_bytes());
        streams.insert(
            NATIVE_STREAM_NAME.to_string(),
            vec![0x02, 0x00, 0x00, 0x00, 0xAB, 0xCD],
        );
        streams.insert("\u{2}OlePres001".to_string(), presentation_stream_bytes());
        streams.insert("\u{2}OlePres000".to_string(), presentation_stream_bytes());
        streams.insert("WordDocument".to_string(), vec![0xFF; 3]);
        streams
    }

    #[test]
    fn test_presentation_stream_names() {
        assert_eq!(presentation_stream_name(0).as_deref(), Some("\u{2}OlePres000"));
        assert_eq!(presentation_stream_name(42).as_deref(), Some("\u{2}OlePres042"));
        assert_eq!(presentation_stream_name(1000), None);
        assert_eq!(parse_presentation_stream_index("\u{2}OlePres999"), Some(999));
        assert_eq!(parse_presentation_stream_index("\u{2}OlePres07"), None);
        assert_eq!(parse_presentation_stream_index("\u{2}OlePres+12"), None);
        assert_eq!(parse_presentation_stream_index("OlePres000"), None);
    }

    #[test]
    fn test_load_storage() {
        let mut streams = storage();
        let storage = ObjectStorage::load(&mut streams).unwrap();
        assert!(!storage.is_linked());
        assert_eq!(storage.native.unwrap().native_data, vec![0xAB, 0xCD]);
        assert_eq!(storage.comp_obj.unwrap().prog_id(), Some("Word.Document.8"));
        let indices: Vec<u16> = storage.presentations.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_load_from_hash_map() {
        let mut streams: HashMap<String, Vec<u8>> = storage().into_iter().collect();
        streams.insert("\u{2}OlePres010".to_string(), presentation_stream_bytes());
        let storage = ObjectStorage::load(&mut streams).unwrap();
        let indices: Vec<u16> = storage.presentations.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, vec![0, 1, 10]);
    }

    #[test]
    fn test_empty_storage() {
        let mut streams: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        assert_eq!(ObjectStorage::load(&mut streams).unwrap(), ObjectStorage::default());
    }

    #[test]
    fn test_malformed_stream_fails_load() {
        let mut streams = storage();
        streams.insert(OLE_STREAM_NAME.to_string(), vec![0u8; 20]);
        assert!(ObjectStorage::load(&mut streams).is_err());
    }
}
