//! Site forms
//!
//! Each module defines one or more form schemas and the typed submission
//! they produce:
//!
//! - `contact`: visitor enquiries with user-type dependent requirements
//! - `account`: sign-in and account creation
//! - `resume`: skill and work experience entries

pub mod account;
pub mod contact;
pub mod registry;
pub mod resume;

pub use account::{AccountSubmission, LoginSubmission};
pub use contact::{ContactMethod, ContactSubmission, UserContext};
pub use registry::FormRegistry;
pub use resume::{ExperienceSubmission, SkillSubmission};
