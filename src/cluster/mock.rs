//! Scripted transport shared by unit tests.

use super::transport::{RawRequest, RawResponse, Transport, TransportFuture};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted outcomes in order and records every request it sees.
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RawRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(outcomes: Vec<Result<RawResponse>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<RawRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: RawRequest) -> TransportFuture<'_> {
        self.requests.lock().unwrap().push(request);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted outcome left");
        Box::pin(async move { outcome })
    }
}

pub(crate) fn respond(status: u16, body: &[u8]) -> Result<RawResponse> {
    Ok(RawResponse {
        status,
        content_type: None,
        body: body.to_vec(),
    })
}

pub(crate) fn refused() -> Result<RawResponse> {
    Err(Error::HostUnreachable("connection refused".to_string()))
}
