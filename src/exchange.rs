use crate::error::ErrorOptions;
use crate::no_type::is_no_type;
use crate::response::{self, Materialize};
use bytes::Bytes;
use futures::future::{Either, MapErr};
use futures::{FutureExt, TryFutureExt};
use headers::{Header, HeaderMapExt};
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, Response, Uri};
use http_body::Body;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::{self, Ready};
use tower::util::Oneshot;
use tower::{Service, ServiceExt};

pub fn builder<M, R>(method: M, uri: R) -> Builder
where
    Method: TryFrom<M>,
    <Method as TryFrom<M>>::Error: Into<http::Error>,
    Uri: TryFrom<R>,
    <Uri as TryFrom<R>>::Error: Into<http::Error>,
{
    Builder {
        inner: Request::builder().method(method).uri(uri),
        body: Ok(None),
        error_options: ErrorOptions::new().with_object(),
    }
}

/// Performs a REST request-response sequence.
///
/// `input` of type `I` is serialized to the JSON request body. A `200 OK`
/// response body is deserialized as `O`; any other status yields
/// [`Error::Api`](crate::Error::Api) whose object is deserialized as `E`.
/// Pass [`NoType`](crate::NoType) as a type argument to skip the
/// corresponding payload. `headers` are sent as given.
pub fn exchange<I, O, E, S, T, U>(
    service: S,
    method: Method,
    uri: &str,
    headers: HeaderMap,
    input: Option<&I>,
) -> Exchange<S, T, U, O, E>
where
    I: Serialize + ?Sized + 'static,
    O: DeserializeOwned + 'static,
    E: DeserializeOwned + Default + PartialEq + 'static,
    S: Service<Request<T>, Response = Response<U>>,
    T: Default + From<Bytes>,
    U: Body,
{
    let builder = builder(method, uri).headers(headers);
    let builder = match input {
        Some(input) => builder.json(input),
        None => builder,
    };
    builder.send(service)
}

pub struct Builder {
    inner: http::request::Builder,
    body: Result<Option<Bytes>, serde_json::Error>,
    error_options: ErrorOptions,
}

impl Builder {
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.inner = self.inner.header(key, value);
        self
    }

    /// Replaces all headers set so far.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        if let Some(h) = self.inner.headers_mut() {
            *h = headers;
        }
        self
    }

    pub fn typed_header<H>(mut self, header: H) -> Self
    where
        H: Header,
    {
        if let Some(h) = self.inner.headers_mut() {
            h.typed_insert(header);
        }
        self
    }

    /// Sets the request body to `input` serialized as JSON.
    ///
    /// Nothing is sent when `I` is [`NoType`](crate::NoType). A serialization
    /// failure is reported by [`Builder::send`] before the request is issued.
    pub fn json<I>(mut self, input: &I) -> Self
    where
        I: Serialize + ?Sized + 'static,
    {
        self.body = if is_no_type::<I>() {
            Ok(None)
        } else {
            serde_json::to_vec(input).map(|body| Some(Bytes::from(body)))
        };
        self
    }

    pub fn body<B>(mut self, body: B) -> Self
    where
        B: Into<Bytes>,
    {
        self.body = Ok(Some(body.into()));
        self
    }

    pub fn error_options(mut self, options: ErrorOptions) -> Self {
        self.error_options = options;
        self
    }

    pub fn send<O, E, S, T, U>(self, service: S) -> Exchange<S, T, U, O, E>
    where
        O: DeserializeOwned + 'static,
        E: DeserializeOwned + Default + PartialEq + 'static,
        S: Service<Request<T>, Response = Response<U>>,
        T: Default + From<Bytes>,
        U: Body,
    {
        let Self {
            inner,
            body,
            error_options,
        } = self;
        let map_err: MapErrFn<S, T, U, E> = crate::Error::Service;
        let request = body.map_err(crate::Error::Encode).and_then(|body| {
            inner
                .body(body.map_or_else(T::default, T::from))
                .map_err(crate::Error::Http)
        });
        let f = match request {
            Ok(request) => {
                tracing::debug!(method = %request.method(), uri = %request.uri(), "sending request");
                service.oneshot(request).map_err(map_err).left_future()
            }
            Err(e) => future::ready(Err(e)).right_future(),
        };
        response::after(f, error_options)
    }
}

pub type Exchange<S, T, U, O, E> = Materialize<Dispatch<S, T, U, E>, U, O, E>;
pub type Dispatch<S, T, U, E> = Either<
    MapErr<Oneshot<S, Request<T>>, MapErrFn<S, T, U, E>>,
    Ready<Result<Response<U>, Error<S, T, U, E>>>,
>;
type MapErrFn<S, T, U, E> = fn(<S as Service<Request<T>>>::Error) -> Error<S, T, U, E>;
type Error<S, T, U, E> =
    crate::Error<<S as Service<Request<T>>>::Error, <U as Body>::Error, E>;
