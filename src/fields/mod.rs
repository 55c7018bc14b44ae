//! Atomic field library
//!
//! Ready-made fields and field factories shared by every form. Each
//! constructor returns `SchemaResult<FieldSchema>` so that a bad definition
//! fails when the registry is built, before any submission is validated.
//!
//! | Field | Normalization | Output |
//! |-------|---------------|--------|
//! | email | trim, lowercase | text |
//! | phone | trim, strip formatting | 10 digits |
//! | person name | trim | text |
//! | password | none | text |
//! | text | trim | text |
//! | number | none | number |
//! | date | trim | date |
//! | color | trim, lowercase | `#rgb` / `#rrggbb` |
//! | select / radio | trim | one option |
//! | checkbox / consent | none | boolean |
//! | checkbox group | trim each | list |

mod choice;
mod credentials;
mod identity;
mod primitives;

pub use choice::{checkbox, checkbox_group, consent, radio, select, Selection};
pub use credentials::{login_password, password, PASSWORD_REQUIRED};
pub use identity::{
    email, person_name, phone, EMAIL_INVALID, EMAIL_REQUIRED, EMAIL_TOO_LONG, PHONE_INVALID,
    PHONE_REQUIRED,
};
pub use primitives::{color, date, number, text};
