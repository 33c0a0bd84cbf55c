use crate::no_type::{is_no_type, is_zero_value};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{error, fmt, str};

/// Error returned for a response whose status is not `200 OK`.
///
/// `object` is decoded from the JSON response body and `message` holds the
/// body as text, each only when turned on in [`ErrorOptions`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HttpError<E> {
    pub status_code: u16,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<E>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<E> HttpError<E> {
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            status: match status.canonical_reason() {
                Some(reason) => format!("{} {reason}", status.as_u16()),
                None => status.as_u16().to_string(),
            },
            object: None,
            message: None,
        }
    }

    /// Builds the error from a fully read response body.
    ///
    /// The structured object is tried first. The message is a fallback, used
    /// when the object was not requested, failed to decode or decoded to
    /// `E::default()`. A decode failure is dropped once the fallback succeeds.
    ///
    /// On failure the partially populated error is returned inside
    /// [`Undecoded`].
    pub fn from_body(
        status: StatusCode,
        body: &[u8],
        options: ErrorOptions,
    ) -> Result<Self, Undecoded<E>>
    where
        E: DeserializeOwned + Default + PartialEq + 'static,
    {
        let mut error = Self::from_status(status);
        if !options.reads_body() {
            return Ok(error);
        }
        if body.is_empty() {
            return Err(Undecoded {
                error,
                source: DecodeError::EmptyBody,
            });
        }

        let mut json = None;
        if options.with_object && !is_no_type::<E>() {
            match serde_json::from_slice(body) {
                Ok(object) => error.object = Some(object),
                Err(e) => json = Some(e),
            }
        }

        if options.with_message
            && (json.is_some() || error.object.as_ref().map_or(true, is_zero_value))
        {
            match str::from_utf8(body) {
                Ok(message) => {
                    if let Some(e) = json {
                        tracing::debug!(error = %e, "error object replaced by message");
                    }
                    error.message = Some(message.to_owned());
                    return Ok(error);
                }
                Err(e) => {
                    let source = match json {
                        Some(json) => DecodeError::JsonUtf8(json, e),
                        None => DecodeError::Utf8(e),
                    };
                    return Err(Undecoded { error, source });
                }
            }
        }

        match json {
            Some(e) => Err(Undecoded {
                error,
                source: DecodeError::Json(e),
            }),
            None => Ok(error),
        }
    }
}

impl<E> fmt::Display for HttpError<E>
where
    E: Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(s) => f.write_str(&s),
            Err(e) => {
                write!(f, "{}", self.status)?;
                if let Some(message) = &self.message {
                    write!(f, ": {message}")?;
                }
                write!(f, " ({e})")
            }
        }
    }
}

impl<E> error::Error for HttpError<E> where E: fmt::Debug + Serialize {}

// turned off by default
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ErrorOptions {
    pub with_object: bool,
    pub with_message: bool,
}

impl ErrorOptions {
    pub const fn new() -> Self {
        Self {
            with_object: false,
            with_message: false,
        }
    }

    /// Turns on decoding of [`HttpError::object`] from the JSON response body.
    pub const fn with_object(mut self) -> Self {
        self.with_object = true;
        self
    }

    /// Turns on [`HttpError::message`] as a plain text fallback.
    pub const fn with_message(mut self) -> Self {
        self.with_message = true;
        self
    }

    pub(crate) const fn reads_body(&self) -> bool {
        self.with_object || self.with_message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("empty response body")]
    EmptyBody,
    #[error(transparent)]
    Json(serde_json::Error),
    #[error("invalid UTF-8 in response body: {0}")]
    Utf8(#[source] str::Utf8Error),
    #[error("{0}; invalid UTF-8 in response body: {1}")]
    JsonUtf8(#[source] serde_json::Error, str::Utf8Error),
}

/// An [`HttpError`] whose body could not be decoded as requested.
#[derive(Debug)]
pub struct Undecoded<E> {
    pub error: HttpError<E>,
    pub source: DecodeError,
}

impl<E> fmt::Display for Undecoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.status, self.source)
    }
}

impl<E> error::Error for Undecoded<E>
where
    E: fmt::Debug,
{
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}
