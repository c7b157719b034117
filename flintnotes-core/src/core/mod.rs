//! Internal domain modules for the Flintnotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod export;
pub mod note;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use self::error::{FlintnotesError, Result};
#[doc(inline)]
pub use self::export::{export_notes, import_notes, ImportSummary};
#[doc(inline)]
pub use self::note::Note;
#[doc(inline)]
pub use self::storage::Storage;
#[doc(inline)]
pub use self::store::NoteStore;
