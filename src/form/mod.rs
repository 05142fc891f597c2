//! Form submission: one controller, parameterized per form by a `FormSpec`.

mod controller;
mod guard;
mod spec;
mod surface;

// re-export
pub use controller::{
    FormController, Outcome, SubmissionState, SubmitError, SubmitEvent, SubmitTrigger,
};
pub use guard::SubmitGuard;
pub use spec::{
    FeedbackRequest, FieldSpec, FieldValues, FormKind, FormMessages, FormSpec, SignupRequest,
    SubmissionRequest,
};
pub use surface::{FormSurface, MemorySurface, MessageStyle, SurfaceEvent};
