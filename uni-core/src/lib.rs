//! Core library of the `uni` Unicode lookup tool.
//!
//! The library answers "what is this character?" against a read-only
//! Unicode repository. The flow is roughly:
//!
//!   UCD text files (bundled or from a directory)
//!     -> ucd          (parsed records, blocks, emoji table)
//!     -> repository   (read-only lookups, loaded once)
//!     -> ident/query  (tokens resolved to ordered result sets)
//!     -> emoji        (group selection and skin-tone composition)
//!     -> render       (aligned rows written to any `io::Write`)
//!
//! The command-line front end lives in `uni-cli`; it should depend on
//! this crate rather than reimplementing any of these steps.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Data model and loading
// ---------------------------------------------------------------------

pub mod category;
pub mod codepoint;
pub mod emoji;
pub mod ucd;
pub mod datafiles;
pub mod repository;

// ---------------------------------------------------------------------
// Resolution and queries
// ---------------------------------------------------------------------

pub mod ident;
pub mod query;

// ---------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------

pub mod entity;
pub mod render;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use emoji::{EmojiSelection, Tone, select_emoji};
pub use error::CoreError;
pub use query::{identify, print, search};
pub use render::RenderOptions;
pub use repository::Repository;
