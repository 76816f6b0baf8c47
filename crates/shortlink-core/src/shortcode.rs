use crate::base62;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = base62::MAX_ENCODED_LEN;

/// A short code identifying a shortened URL.
///
/// Short codes are 1-11 characters long and contain only the base-62
/// alphabet `[0-9a-zA-Z]`. A generated code is the base-62 encoding of a
/// global counter value, so every valid code maps back to exactly one
/// integer through [`ShortCode::to_id`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Creates a `ShortCode` by base-62 encoding a counter value.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortlink_core::ShortCode;
    ///
    /// assert_eq!(ShortCode::from_id(1).as_str(), "1");
    /// assert_eq!(ShortCode::from_id(62).as_str(), "10");
    /// ```
    pub fn from_id(id: u64) -> Self {
        Self(base62::encode(id))
    }

    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are 1-11 characters from `[0-9a-zA-Z]`.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CoreError> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes read back from trusted internal sources.
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code.as_ref()))
    }

    /// Decodes the short code back into the counter value it encodes.
    pub fn to_id(&self) -> Result<u64, CoreError> {
        base62::decode(&self.0)
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(base62::is_symbol) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortCode").field(&self.0).finish()
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ShortCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ShortCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
