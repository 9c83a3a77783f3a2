//! Response bodies that rendered views are appended to.
//!
//! [`Renderer::render`](crate::Renderer::render) hands its output to a
//! [`ResponseSink`]. The renderer only ever appends; it never reads, clears or
//! replaces what is already in the body.
//!
//! | Sink | Body type |
//! |------|-----------|
//! | `String` | UTF-8 text |
//! | `Vec<u8>` | raw bytes |
//! | [`WriteSink`] | any [`std::io::Write`] |
//! | `axum::http::Response<String>` (feature `axum`) | HTTP response body |
//! | `&mut S` | borrows any of the above |

use std::io::Write;

use crate::error::RenderError;

/// A mutable body the renderer appends text to.
pub trait ResponseSink {
    /// Appends `text` to the end of the body.
    fn append_body(&mut self, text: &str) -> Result<(), RenderError>;
}

impl ResponseSink for String {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        self.push_str(text);
        Ok(())
    }
}

impl ResponseSink for Vec<u8> {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        self.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        (**self).append_body(text)
    }
}

/// Adapts any [`Write`] implementor (a socket, a file, a locked stdout) into a sink.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResponseSink for WriteSink<W> {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(feature = "axum")]
impl ResponseSink for axum::http::Response<String> {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        self.body_mut().push_str(text);
        Ok(())
    }
}

#[cfg(feature = "axum")]
impl ResponseSink for axum::http::Response<Vec<u8>> {
    fn append_body(&mut self, text: &str) -> Result<(), RenderError> {
        self.body_mut().extend_from_slice(text.as_bytes());
        Ok(())
    }
}
