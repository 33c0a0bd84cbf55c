pub mod auth;
pub mod error;
pub mod exchange;
pub mod no_type;
pub mod response;

pub use auth::auth_basic;
pub use error::{DecodeError, ErrorOptions, HttpError, Undecoded};
pub use exchange::{builder, exchange};
pub use no_type::{is_no_type, is_zero_value, NoType};
pub use response::{is_not_status_ok, materialize};

#[derive(Debug, thiserror::Error)]
pub enum Error<S, B, E> {
    #[error(transparent)]
    Body(B),
    #[error(transparent)]
    Http(http::Error),
    #[error(transparent)]
    Service(S),
    #[error(transparent)]
    Encode(serde_json::Error),
    #[error(transparent)]
    Decode(serde_json::Error),

    #[error(transparent)]
    Api(HttpError<E>),
    #[error(transparent)]
    ApiBody(Undecoded<E>),
}
