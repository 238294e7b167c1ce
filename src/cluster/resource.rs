use super::transport::RawResponse;
use crate::error::Result;

type Parser<T> = Box<dyn FnOnce(&RawResponse) -> Result<T> + Send>;

/// A URL on a concrete host paired with the function that parses its successful response.
pub struct Resource<T> {
    url: String,
    parse: Parser<T>,
}

impl<T> Resource<T> {
    pub fn new<F>(url: impl Into<String>, parse: F) -> Self
    where
        F: FnOnce(&RawResponse) -> Result<T> + Send + 'static,
    {
        Self {
            url: url.into(),
            parse: Box::new(parse),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parse(self, response: &RawResponse) -> Result<T> {
        (self.parse)(response)
    }
}

impl Resource<()> {
    /// A resource whose response body is ignored.
    pub fn reference(url: impl Into<String>) -> Self {
        Self::new(url, |_| Ok(()))
    }
}
