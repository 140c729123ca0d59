pub mod errors;
pub mod form;
pub mod review;
pub mod sections;
pub mod services;
pub mod session;
pub mod state;
pub mod submission;
pub mod supabase;
pub mod validation;

pub use self::form::{FormSession, Stage};
pub use self::services::{IdentityService, ObjectStorage, RecordStore};
pub use self::session::{Session, ShellState};
pub use self::state::{FieldUpdate, FormState};
pub use self::submission::{SubmissionOutcome, SubmissionPipeline};
pub use self::supabase::SupabaseClient;

#[allow(clippy::unwrap_used)]
#[cfg(test)]
pub(crate) mod test_utils;
