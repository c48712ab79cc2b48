//! Tab and window: the document-facing layer above `core-text`'s gap buffers
//! and `core-layout`'s rendering tree.

pub mod tab;
pub mod window;

pub use tab::Tab;
pub use window::Window;
