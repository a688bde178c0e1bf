use std::path::{Path, PathBuf};

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode, header};
use hyper_util::rt::TokioIo;

use super::{Error, ManagementApi, Result};

/// [`ManagementApi`] implementation speaking HTTP/1.1 over a Unix socket.
///
/// Every request opens its own connection; the run issues one request per container, so
/// there is nothing to gain from pooling.
#[derive(Debug, Clone)]
pub struct UnixSocketClient {
    socket_path: PathBuf,
}

impl UnixSocketClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn request(&self, path: &str) -> Result<Bytes> {
        log::trace!("GET {} via {}", path, self.socket_path.display());
        let stream = tokio::net::UnixStream::connect(&self.socket_path)
            .await
            .map_err(|source| Error::Connect {
                path: self.socket_path.clone(),
                source,
            })?;

        let (mut sender, connection) =
            hyper::client::conn::http1::handshake::<_, Empty<Bytes>>(TokioIo::new(stream))
                .await
                .map_err(Error::Handshake)?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                log::debug!("management API connection closed with error: {err}");
            }
        });

        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::HOST, "lxd")
            .body(Empty::<Bytes>::new())
            .map_err(|err| Error::InvalidRequest {
                path: path.to_owned(),
                source: err.into(),
            })?;

        let response = sender
            .send_request(request)
            .await
            .map_err(|source| Error::Request {
                path: path.to_owned(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status {
                path: path.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|source| Error::Body {
                path: path.to_owned(),
                source,
            })?
            .to_bytes();
        log::trace!("GET {} returned {} bytes", path, body.len());

        Ok(body)
    }
}

impl ManagementApi for UnixSocketClient {
    fn get(&self, path: &str) -> impl Future<Output = Result<Bytes>> + Send {
        self.request(path)
    }
}
