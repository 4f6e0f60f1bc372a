//! # card_form
//!
//! Logic behind an interactive credit card entry form: per-field validation,
//! card number formatting as you type, a live card preview, and the switch
//! between the input form and the completion panel.
//!
//! ## Features
//!
//! - Per-field rules (required, max length, pattern) with fixed user messages
//! - Joint month/year expiry validation against a pluggable clock
//! - Card number regrouping in blocks of four while typing
//! - Card preview that only ever shows the last valid values
//! - Editing / Completed state machine with reset
//! - UI-agnostic dispatcher: WASM bindings and a CLI both drive the same core
//!
//! ## Quick Start
//!
//! ```rust
//! use card_form::{rules, Field, FieldError};
//!
//! assert_eq!(rules::validate(Field::Name, "Jane Appleseed"), None);
//! assert_eq!(rules::validate(Field::Cvc, "12a"), Some(FieldError::WrongFormat(Field::Cvc)));
//! assert_eq!(FieldError::WrongFormat(Field::Cvc).to_string(), "Must be 3 digits");
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use card_form::format;
//!
//! assert_eq!(format::format_card_number("1234567890123456"), "1234 5678 9012 3456");
//! assert_eq!(format::format_card_number("1234 5678 9012 3456"), "1234 5678 9012 3456");
//! ```
//!
//! ## Expiry Validation
//!
//! ```rust
//! use card_form::expiry::{validate_expiration, YearMonth};
//! use card_form::FieldError;
//!
//! let today = YearMonth::new(2025, 6).unwrap();
//! assert_eq!(validate_expiration("05", "25", today), Err(FieldError::Expired));
//! assert!(validate_expiration("06", "25", today).is_ok());
//! ```
//!
//! ## Driving the Form
//!
//! ```rust
//! use card_form::expiry::{FixedClock, YearMonth};
//! use card_form::{Field, FormController, FormState};
//!
//! let mut form = FormController::with_clock(FixedClock(YearMonth::new(2025, 6).unwrap()));
//!
//! let outcome = form.apply_input(Field::Number, "4111111111111111");
//! assert_eq!(outcome.value, "4111 1111 1111 1111");
//! assert_eq!(form.preview().number(), "4111 1111 1111 1111");
//!
//! // Nothing else is filled in yet.
//! assert!(!form.submit().is_completed());
//! assert_eq!(form.state(), FormState::Editing);
//! ```
//!
//! ## Validation Rules
//!
//! | Field | Rule | Message |
//! |-------|------|---------|
//! | any | empty after trimming | Can't be blank |
//! | name | more than 20 characters | Too long |
//! | name | not two alphabetic words | Wrong format |
//! | number | not `#### #### #### ####` | Wrong format, 16 digits required |
//! | cvc | not three digits | Must be 3 digits |
//! | month | not `01`-`12` | Invalid month |
//! | year | not two digits | Invalid year |
//! | month + year | before the current month | Card expired |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize` for views and outcomes |
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Field values are zeroized when the form is reset or dropped
//! - `Debug` output masks the card number and CVC
//! - Logging never records field values
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod expiry;
pub mod field;
pub mod form;
pub mod format;
pub mod preview;
pub mod rules;
pub mod values;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use dispatch::{Dispatcher, Surface, UiEvent};
pub use error::{FieldError, TransitionError};
pub use field::{ErrorSlot, Field, ParseFieldError};
pub use form::{FormController, FormOptions, FormState, FormView, Panel, SubmitOutcome};
pub use preview::CardPreview;
pub use rules::{validate, validate_field, RuleSet};
