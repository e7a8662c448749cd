//! Output rendering.

mod json;

pub use json::{analysis_to_json, outline_to_json, to_json, write_json, JsonFormat};
