#![warn(clippy::all, rust_2018_idioms)]

pub mod clipboard;
pub mod color;
pub mod config;
pub mod edit;
pub mod error;
pub mod history;
pub mod pixels;
pub mod point;
pub mod renderer;
pub mod serializer;
pub mod state;
pub mod text_editor;
pub mod util;

pub use clipboard::PasteData;
pub use color::Color;
pub use config::EditorConfig;
pub use edit::{DrawMode, DrawTarget, Edit, EditType, HasColor};
pub use error::Error;
pub use history::{DirtyLevel, EditStack};
pub use pixels::{DirtyRect, PixelBuffer};
pub use point::Point;
pub use renderer::{FrameDamage, Renderer};
pub use serializer::Serializer;
pub use text_editor::TextEditor;
