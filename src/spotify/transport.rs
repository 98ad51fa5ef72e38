use std::future::Future;

use reqwest::{Client, Method, header::CONTENT_LENGTH};

use crate::{
    error::TransportError,
    spotify::request::{ApiRequest, ParamEncoding},
};

/// Raw answer from the wire: status and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between the client and the network.
///
/// Pooling, retries and TLS are the implementation's business; the client
/// only needs one request to produce one response or one failure.
pub trait HttpTransport: Send + Sync {
    fn request(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Transport backed by a shared [`reqwest::Client`].
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        match request.encoding {
            ParamEncoding::Query => {
                if !request.params.is_empty() {
                    builder = builder.query(&request.params);
                }
            }
            ParamEncoding::Form => builder = builder.form(&request.params),
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        } else if request.method != Method::GET && request.encoding == ParamEncoding::Query {
            // PUT/DELETE without a body still need an explicit zero length
            builder = builder.header(CONTENT_LENGTH, 0);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
