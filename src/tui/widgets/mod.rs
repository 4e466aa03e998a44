//! Reusable interactive widgets
//!
//! Widgets are plain values owned by a screen. The screen forwards events to
//! the widget's `update` and splices its `view` lines into its own body.

pub mod checkbox;
pub mod downloader;
pub mod loading;
pub mod selection;
pub mod text_input;

pub use checkbox::CheckBox;
pub use downloader::{Downloader, format_bytes};
pub use loading::{LoadStatus, Loading};
pub use selection::{Selectable, Selector};
pub use text_input::{FieldStatus, InputBuffer, TextField, ValidationError, Validator};
