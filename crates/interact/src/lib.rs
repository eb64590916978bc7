//! Client-side behavior of the scholarfolio pages.
//!
//! Everything here is written against the [`Document`] trait so it runs
//! unchanged in the browser build and against `MemoryDocument` in tests.
//! The in-memory document is only compiled with the `testing` feature.

mod dom;
mod error;
mod fields;
mod filter;
mod notification;
mod page;
mod payload;
mod settings;
mod submit;
mod ui;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use dom::*;
pub use error::{Error, Result};
pub use fields::*;
pub use filter::*;
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryDocument;
pub use notification::*;
pub use page::*;
pub use payload::*;
pub use settings::*;
pub use submit::*;
pub use ui::*;
