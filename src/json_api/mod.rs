//! # JSON API
//!
//! Deserialize JSON print jobs into [`PrintStep`](crate::builder::PrintStep)s.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use thermoline::json_api::JsonJob;
//!
//! let json = r#"{
//!     "encoding": "ascii",
//!     "steps": [
//!         {"type": "text", "runs": [
//!             {"text": "HELLO", "align": "center", "font": "large"},
//!             {"new_line": 1},
//!             {"text": "world"}
//!         ]},
//!         {"type": "new_line", "times": 2}
//!     ]
//! }"#;
//!
//! let job: JsonJob = serde_json::from_str(json).unwrap();
//! let data = job.to_job(Path::new(".")).unwrap().build().unwrap();
//! assert!(data.bytes.ends_with(&[0x0A; 7]));
//! ```

mod convert;
mod schema;

pub use convert::JsonApiError;
pub use schema::{JsonImage, JsonJob, JsonNewLine, JsonPrinter, JsonRun, JsonStep, JsonTextBlock, JsonTextRun};
