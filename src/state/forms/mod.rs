//! Draft form model for the builder page

mod draft;
mod field;
mod validation;

pub use draft::{DraftField, FormDraft, SaveError};
pub use field::FormField;
