//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use viewkit::prelude::*;
//!
//! let renderer = Renderer::new("views", Attributes::new());
//! let body = renderer.render(String::new(), "home.html", &Attributes::new())?;
//! ```

pub use crate::attributes::{Attributes, RenderContext};
pub use crate::engine::{MiniJinjaEngine, SimpleEngine, TemplateEngine};
pub use crate::error::RenderError;
pub use crate::renderer::Renderer;
pub use crate::sink::ResponseSink;
