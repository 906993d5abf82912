// Editor sessions: one shared ResumeStore per résumé being edited, the form
// controllers and template picker bound to it, and the session's own preview mount.

pub mod handlers;
pub mod session;
pub mod store;

pub use session::{EditorSession, SessionRegistry, SessionSummary};
pub use store::ResumeStore;
