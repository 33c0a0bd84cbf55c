use crate::error::{ErrorOptions, HttpError};
use crate::no_type::is_no_type;
use crate::Error;
use http::{Response, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::future::{self, Future, Ready};
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Determines whether the response status is not `200 OK`.
pub fn is_not_status_ok<B>(response: &Response<B>) -> bool {
    response.status() != StatusCode::OK
}

/// Decodes an already received response.
///
/// A `200 OK` body is decoded as `O`, or left unread when `O` is
/// [`NoType`](crate::NoType). Any other status becomes [`Error::Api`] with
/// the error object decoded as `E`.
pub fn materialize<U, O, E>(response: Response<U>) -> Materialize<Received<U, E>, U, O, E>
where
    U: Body,
{
    materialize_with(response, ErrorOptions::new().with_object())
}

pub fn materialize_with<U, O, E>(
    response: Response<U>,
    options: ErrorOptions,
) -> Materialize<Received<U, E>, U, O, E>
where
    U: Body,
{
    after(future::ready(Ok(response)), options)
}
pub type Received<U, E> = Ready<Result<Response<U>, Error<Infallible, <U as Body>::Error, E>>>;

pub(crate) fn after<F, U, O, E>(f: F, options: ErrorOptions) -> Materialize<F, U, O, E>
where
    U: Body,
{
    Materialize {
        state: State::S0(f),
        options,
        _marker: PhantomData,
    }
}

#[pin_project::pin_project]
pub struct Materialize<F, U, O, E>
where
    U: Body,
{
    #[pin]
    state: State<F, U>,
    options: ErrorOptions,
    _marker: PhantomData<fn() -> (O, E)>,
}

#[pin_project::pin_project(project = StateProj)]
#[allow(clippy::large_enum_variant)]
enum State<F, U>
where
    U: Body,
{
    S0(#[pin] F),
    S1(#[pin] http_body_util::combinators::Collect<U>, StatusCode),
    S2(#[pin] http_body_util::combinators::Collect<U>),
}

impl<F, U, O, E, SE> Future for Materialize<F, U, O, E>
where
    F: Future<Output = Result<Response<U>, Error<SE, U::Error, E>>>,
    U: Body,
    O: DeserializeOwned + 'static,
    E: DeserializeOwned + Default + PartialEq + 'static,
{
    type Output = Result<Option<O>, Error<SE, U::Error, E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            match this.state.as_mut().project() {
                StateProj::S0(f) => {
                    let response = ready!(f.poll(cx))?;
                    let status = response.status();
                    tracing::debug!(%status, "received response");
                    if is_not_status_ok(&response) {
                        if !this.options.reads_body() {
                            break Poll::Ready(Err(Error::Api(HttpError::from_status(status))));
                        }
                        this.state
                            .set(State::S1(response.into_body().collect(), status));
                    } else if is_no_type::<O>() {
                        break Poll::Ready(Ok(None));
                    } else {
                        this.state.set(State::S2(response.into_body().collect()));
                    }
                }
                StateProj::S1(f, status) => {
                    let body = ready!(f.poll(cx)).map_err(Error::Body)?.to_bytes();
                    let e = match HttpError::from_body(*status, &body, *this.options) {
                        Ok(e) => Error::Api(e),
                        Err(e) => Error::ApiBody(e),
                    };
                    break Poll::Ready(Err(e));
                }
                StateProj::S2(f) => {
                    let body = ready!(f.poll(cx)).map_err(Error::Body)?.to_bytes();
                    let output = serde_json::from_slice(&body).map_err(Error::Decode)?;
                    break Poll::Ready(Ok(Some(output)));
                }
            }
        }
    }
}
