use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::AppError;

const DATA_SCHEME: &str = "data:";

// Browsers emit padded payloads, hand-built clients often don't.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A data-URL split at its first comma into header and payload.
///
/// Only the comma is required. A header that is not of the
/// `data:<mime>[;params]` form is still accepted, it simply has no mime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    header: &'a str,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    pub fn parse(input: &'a str) -> Result<Self, AppError> {
        let (header, payload) = input.split_once(',').ok_or_else(|| {
            AppError::MalformedRequest("image is not a data-URL: missing ','".to_string())
        })?;
        Ok(Self { header, payload })
    }

    pub fn payload(&self) -> &'a str {
        self.payload
    }

    pub fn mime_type(&self) -> Option<&'a str> {
        self.media_type()?
            .split(';')
            .next()
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
    }

    pub fn is_base64(&self) -> bool {
        self.media_type().is_some_and(|media| {
            media
                .split(';')
                .skip(1)
                .any(|param| param.trim().eq_ignore_ascii_case("base64"))
        })
    }

    /// Decodes the payload as standard base64.
    pub fn decode(&self) -> Result<Vec<u8>, AppError> {
        decode_base64(self.payload())
    }

    fn media_type(&self) -> Option<&'a str> {
        let scheme = self.header.get(..DATA_SCHEME.len())?;
        if scheme.eq_ignore_ascii_case(DATA_SCHEME) {
            Some(&self.header[DATA_SCHEME.len()..])
        } else {
            None
        }
    }
}

pub fn parse_data_url(input: &str) -> Result<DataUrl<'_>, AppError> {
    DataUrl::parse(input)
}

/// Decodes a base64 payload, skipping ASCII whitespace from line-wrapped input.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, AppError> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();

    PAYLOAD_ENGINE
        .decode(&compact)
        .map_err(|e| AppError::MalformedRequest(format!("image payload is not valid base64: {e}")))
}
