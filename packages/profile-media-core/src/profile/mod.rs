pub mod editor;
pub mod form;
pub mod in_flight;
pub mod kind;
pub mod record;
pub mod tags;

pub use editor::ProfileEditor;
pub use form::{ImageSelection, ProfileForm};
pub use in_flight::{InFlightSubmissions, SubmissionGuard};
pub use kind::ImageKind;
pub use record::{ProfileChanges, ProfileRecord};
pub use tags::TagInput;
