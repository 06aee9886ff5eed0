//! The flow document model and everything that edits, checks and persists
//! it.

pub mod action;
pub mod archive;
pub mod conversion;
pub mod document;
pub mod editor;
pub mod validator;

pub use action::*;
pub use archive::*;
pub use conversion::*;
pub use document::*;
pub use editor::*;
pub use validator::*;
