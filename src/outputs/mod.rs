//! Output generation for the programme guide.
//!
//! # Submodules
//!
//! - [`xmltv`]: Serializes channels and programmes into an XMLTV document
//! - [`file`]: Persists the serialized document to disk
//!
//! # Output Structure
//!
//! ```text
//! public/
//! └── guide.xml
//! ```

pub mod file;
pub mod xmltv;
