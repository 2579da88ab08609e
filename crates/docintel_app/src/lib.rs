//! Application shell: binds a host page to the document-intelligence flows.
mod effects;
mod error;
mod handles;
pub mod logging;
mod page;
mod render;
mod shell;

pub use effects::EffectRunner;
pub use error::AppError;
pub use handles::{ElementId, PageHandles};
pub use page::{FormFields, Page, PageCommand, PageEvent};
pub use render::render;
pub use shell::AppShell;
