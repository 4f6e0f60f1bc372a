//! The form controller: real-time validation, submit and the view state.
//!
//! [`FormController`] owns everything the card form shows. UI code feeds it
//! three kinds of event and reads back a [`FormView`]:
//!
//! - [`apply_input`](FormController::apply_input) on every keystroke
//! - [`submit`](FormController::submit) when the form is submitted
//! - [`acknowledge`](FormController::acknowledge) from the completion panel
//!
//! ```text
//!            submit (all valid)
//!   Editing ------------------> Completed
//!      ^                            |
//!      +-------- acknowledge -------+
//! ```
//!
//! # Example
//!
//! ```
//! use card_form::expiry::{FixedClock, YearMonth};
//! use card_form::{Field, FormController, FormState, SubmitOutcome};
//!
//! let today = YearMonth::new(2025, 6).unwrap();
//! let mut form = FormController::with_clock(FixedClock(today));
//!
//! form.apply_input(Field::Name, "Jane Appleseed");
//! form.apply_input(Field::Number, "1234567890123456");
//! form.apply_input(Field::Month, "09");
//! form.apply_input(Field::Year, "27");
//! form.apply_input(Field::Cvc, "123");
//!
//! assert_eq!(form.preview().number(), "1234 5678 9012 3456");
//! assert_eq!(form.submit(), SubmitOutcome::Completed);
//! assert_eq!(form.state(), FormState::Completed);
//!
//! form.acknowledge().unwrap();
//! assert_eq!(form.preview().name(), "Jane Appleseed");
//! assert_eq!(form.values().get(Field::Cvc), "");
//! ```

use crate::expiry::{validate_expiration, Clock, ExpiryDate, SystemClock};
use crate::format::format_card_number;
use crate::preview::CardPreview;
use crate::rules::RuleSet;
use crate::values::FormValues;
use crate::{ErrorSlot, Field, FieldError, TransitionError};
use std::fmt;
use tracing::{debug, info};

/// The two top-level view states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormState {
    /// The input form is shown.
    #[default]
    Editing,
    /// The completion panel is shown.
    Completed,
}

impl FormState {
    /// Returns the one panel visible in this state.
    #[inline]
    pub const fn visible_panel(&self) -> Panel {
        match self {
            Self::Editing => Panel::Form,
            Self::Completed => Panel::Complete,
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => f.write_str("editing"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// One of the two state containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Panel {
    /// The input form.
    Form,
    /// The "thank you" completion panel.
    Complete,
}

/// Configuration of a form controller.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Rules applied both on input and on submit.
    pub rules: RuleSet,
    /// Text shown on the preview before any valid input and after reset.
    pub placeholders: CardPreview,
}

/// Result of one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOutcome {
    /// The field that received input.
    pub field: Field,
    /// The value now held by the field; reformatted for the number field.
    pub value: String,
    /// The error region the field reports into.
    pub slot: ErrorSlot,
    /// The error now shown in that region, if any.
    pub error: Option<FieldError>,
    /// True if the preview changed as a result of this input.
    pub preview_updated: bool,
}

impl InputOutcome {
    /// Returns true if the input left its error region clear.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// An error shown in one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlotError {
    /// The region.
    pub slot: ErrorSlot,
    /// The error shown there.
    pub error: FieldError,
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the completion panel is shown.
    Completed,
    /// At least one region has an error; the form stays in editing.
    Rejected(Vec<SlotError>),
}

impl SubmitOutcome {
    /// Returns true if the form was completed.
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the accumulated errors (empty when completed).
    pub fn errors(&self) -> &[SlotError] {
        match self {
            Self::Completed => &[],
            Self::Rejected(errors) => errors,
        }
    }
}

/// Owns the state of one card form.
pub struct FormController<C = SystemClock> {
    options: FormOptions,
    clock: C,
    values: FormValues,
    errors: [Option<FieldError>; 4],
    preview: CardPreview,
    state: FormState,
}

impl FormController<SystemClock> {
    /// Creates a form with the standard rules, checking expiry against the
    /// system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FormController<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FormController<C> {
    /// Creates a form with the standard rules and a custom clock.
    pub fn with_clock(clock: C) -> Self {
        Self::with_options(FormOptions::default(), clock)
    }

    /// Creates a form from explicit options.
    pub fn with_options(options: FormOptions, clock: C) -> Self {
        let preview = options.placeholders.clone();
        Self {
            options,
            clock,
            values: FormValues::new(),
            errors: [None; 4],
            preview,
            state: FormState::Editing,
        }
    }

    /// Handles one input event on `field`.
    ///
    /// The number field is reformatted first. Month and year run the joint
    /// expiry check against the current month and year values; every other
    /// field runs its own rule. The field's error region is set or cleared,
    /// and on success the preview is synced.
    pub fn apply_input(&mut self, field: Field, raw: &str) -> InputOutcome {
        let value = match field {
            Field::Number => format_card_number(raw),
            _ => raw.to_string(),
        };
        self.values.set(field, &value);

        let slot = field.error_slot();
        let (error, preview_updated) = if field.is_expiry() {
            match self.check_expiry() {
                Ok(_) => (None, self.sync_expiry()),
                Err(e) => (Some(e), false),
            }
        } else {
            match self.check_field(field) {
                Ok(()) => (None, self.preview.sync(field, &value)),
                Err(e) => (Some(e), false),
            }
        };

        self.set_slot(slot, error);
        debug!(field = %field, slot = %slot, error = ?error, "validated input");

        InputOutcome {
            field,
            value,
            slot,
            error,
            preview_updated,
        }
    }

    /// Runs the full validation pass and, if everything passes, shows the
    /// completion panel.
    ///
    /// Every region is updated: failing ones show their error, passing ones
    /// are cleared and their preview slots synced. On failure the form is
    /// (or returns to) editing.
    pub fn submit(&mut self) -> SubmitOutcome {
        let mut failures = Vec::new();

        for field in [Field::Name, Field::Number, Field::Cvc] {
            let slot = field.error_slot();
            match self.check_field(field) {
                Ok(()) => {
                    self.set_slot(slot, None);
                    let value = self.values.get(field).to_string();
                    self.preview.sync(field, &value);
                }
                Err(error) => {
                    self.set_slot(slot, Some(error));
                    failures.push(SlotError { slot, error });
                }
            }
        }

        match self.check_expiry() {
            Ok(_) => {
                self.set_slot(ErrorSlot::Expiry, None);
                self.sync_expiry();
            }
            Err(error) => {
                self.set_slot(ErrorSlot::Expiry, Some(error));
                failures.push(SlotError {
                    slot: ErrorSlot::Expiry,
                    error,
                });
            }
        }

        if failures.is_empty() {
            self.transition(FormState::Completed);
            SubmitOutcome::Completed
        } else {
            debug!(errors = failures.len(), "submit rejected");
            self.transition(FormState::Editing);
            SubmitOutcome::Rejected(failures)
        }
    }

    /// Returns from the completion panel to an empty form.
    ///
    /// Clears every value and error and restores the preview placeholders.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotCompleted`] if the form is still being edited;
    /// nothing is changed in that case.
    pub fn acknowledge(&mut self) -> Result<(), TransitionError> {
        if self.state != FormState::Completed {
            return Err(TransitionError::NotCompleted);
        }

        self.values.clear();
        self.errors = [None; 4];
        self.preview.reset_to(&self.options.placeholders);
        self.transition(FormState::Editing);
        Ok(())
    }

    /// Validates a single field against the current rules without touching
    /// any state. Month and year use their standalone checks.
    pub fn validate(&self, field: Field, raw: &str) -> Option<FieldError> {
        self.options.rules.validate(field, raw)
    }

    /// Returns the current view state.
    #[inline]
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Returns true if the completion panel is shown.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == FormState::Completed
    }

    /// Returns the card preview.
    #[inline]
    pub fn preview(&self) -> &CardPreview {
        &self.preview
    }

    /// Returns the current input values.
    #[inline]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the error shown in a region, if any.
    #[inline]
    pub fn error(&self, slot: ErrorSlot) -> Option<FieldError> {
        self.errors[slot.index()]
    }

    /// Returns true if any region shows an error.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// Returns the rules in use.
    pub fn rules(&self) -> &RuleSet {
        &self.options.rules
    }

    /// Returns the clock in use.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Takes a snapshot of everything the UI shows.
    pub fn view(&self) -> FormView {
        let inputs = Field::ALL
            .iter()
            .map(|&field| InputView {
                field,
                value: self.values.get(field).to_string(),
                error_class: self.error(field.error_slot()).is_some(),
            })
            .collect();

        let errors = ErrorSlot::ALL
            .iter()
            .map(|&slot| ErrorView {
                slot,
                message: self.error(slot).map(|e| e.message()),
            })
            .collect();

        FormView {
            state: self.state,
            panel: self.state.visible_panel(),
            inputs,
            errors,
            preview: self.preview.clone(),
        }
    }

    fn check_field(&self, field: Field) -> Result<(), FieldError> {
        self.options
            .rules
            .validate_field(field, self.values.get(field))
    }

    fn check_expiry(&self) -> Result<ExpiryDate, FieldError> {
        validate_expiration(
            self.values.get(Field::Month),
            self.values.get(Field::Year),
            self.clock.today(),
        )
    }

    fn sync_expiry(&mut self) -> bool {
        let month = self.values.get(Field::Month).to_string();
        let year = self.values.get(Field::Year).to_string();
        self.preview.sync(Field::Month, &month);
        self.preview.sync(Field::Year, &year);
        true
    }

    fn set_slot(&mut self, slot: ErrorSlot, error: Option<FieldError>) {
        self.errors[slot.index()] = error;
    }

    fn transition(&mut self, to: FormState) {
        if self.state != to {
            info!(from = %self.state, to = %to, "form state changed");
            self.state = to;
        }
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for FormController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("preview", &self.preview)
            .field("clock", &self.clock)
            .finish()
    }
}

/// Snapshot of one input element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InputView {
    /// The field.
    pub field: Field,
    /// Current text.
    pub value: String,
    /// Whether the input carries the error class.
    pub error_class: bool,
}

/// Snapshot of one error-message region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorView {
    /// The region.
    pub slot: ErrorSlot,
    /// Message shown; `None` means the region is hidden.
    pub message: Option<&'static str>,
}

impl ErrorView {
    /// Returns true if the region is shown.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// Snapshot of everything the form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormView {
    /// View state.
    pub state: FormState,
    /// The one visible panel.
    pub panel: Panel,
    /// Every input, in form order.
    pub inputs: Vec<InputView>,
    /// Every error region, in submit order.
    pub errors: Vec<ErrorView>,
    /// Preview text.
    pub preview: CardPreview,
}

impl FormView {
    /// Returns the snapshot of one input.
    pub fn input(&self, field: Field) -> Option<&InputView> {
        self.inputs.iter().find(|i| i.field == field)
    }

    /// Returns the snapshot of one error region.
    pub fn error(&self, slot: ErrorSlot) -> Option<&ErrorView> {
        self.errors.iter().find(|e| e.slot == slot)
    }
}
