//! In-memory [`ManagementApi`] used by unit tests.

use std::collections::HashMap;

use hyper::body::Bytes;

use super::{Error, ManagementApi, Result};

/// Answers requests from a fixed table of `(status, body)` per path. Unknown paths get a 404.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    responses: HashMap<String, (u16, String)>,
}

impl FakeApi {
    pub(crate) fn with(mut self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(path.to_owned(), (status, body.to_owned()));
        self
    }
}

impl ManagementApi for FakeApi {
    async fn get(&self, path: &str) -> Result<Bytes> {
        match self.responses.get(path) {
            Some((200, body)) => Ok(Bytes::from(body.clone())),
            Some((status, _)) => Err(Error::Status {
                path: path.to_owned(),
                status: *status,
            }),
            None => Err(Error::Status {
                path: path.to_owned(),
                status: 404,
            }),
        }
    }
}
