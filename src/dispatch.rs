//! UI event dispatch.
//!
//! A UI implements [`Surface`] over its widgets (DOM nodes, terminal lines,
//! a test recorder) and hands every user event to a [`Dispatcher`]. The
//! dispatcher applies the event to its [`FormController`] and then pushes
//! the resulting [`FormView`] to the surface, so the surface never holds
//! any form logic.
//!
//! Events can also be written as one-line scripts:
//!
//! | Line                       | Event                              |
//! |----------------------------|------------------------------------|
//! | `input name Jane Appleseed` | `Input { field: Name, value: .. }` |
//! | `input cvc`                | input with an empty value          |
//! | `submit`                   | `Submit`                           |
//! | `ack`                      | `Acknowledge`                      |
//!
//! # Example
//!
//! ```
//! use card_form::dispatch::{Dispatcher, Surface, UiEvent};
//! use card_form::expiry::{FixedClock, YearMonth};
//! use card_form::{ErrorSlot, Field, FormController, Panel};
//!
//! #[derive(Default)]
//! struct Panels(Option<Panel>);
//!
//! impl Surface for Panels {
//!     fn set_input_value(&mut self, _: Field, _: &str) {}
//!     fn set_error(&mut self, _: ErrorSlot, _: Option<&str>) {}
//!     fn set_preview(&mut self, _: Field, _: &str) {}
//!     fn show_panel(&mut self, panel: Panel) {
//!         self.0 = Some(panel);
//!     }
//! }
//!
//! let form = FormController::with_clock(FixedClock(YearMonth::new(2025, 6).unwrap()));
//! let mut dispatcher = Dispatcher::new(form, Panels::default());
//!
//! dispatcher.dispatch(&"submit".parse::<UiEvent>().unwrap());
//! assert_eq!(dispatcher.surface().0, Some(Panel::Form));
//! ```

use crate::expiry::Clock;
use crate::form::{FormController, FormView, InputOutcome, Panel, SubmitOutcome};
use crate::{ErrorSlot, Field, ParseFieldError, TransitionError};
use std::fmt;
use std::str::FromStr;

/// The widgets a UI exposes to the form.
pub trait Surface {
    /// Writes text into an input element.
    fn set_input_value(&mut self, field: Field, value: &str);

    /// Shows `message` in an error region and adds the error class to its
    /// inputs, or hides the region and removes the class when `None`.
    fn set_error(&mut self, slot: ErrorSlot, message: Option<&str>);

    /// Writes text into a preview slot (never called for cvc).
    fn set_preview(&mut self, field: Field, text: &str);

    /// Shows one panel and hides the other.
    fn show_panel(&mut self, panel: Panel);
}

/// A user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The text of an input changed.
    Input {
        /// The input.
        field: Field,
        /// Its new text.
        value: String,
    },
    /// The form was submitted.
    Submit,
    /// The completion panel's button was pressed.
    Acknowledge,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// An input was validated.
    Input(InputOutcome),
    /// The form was submitted.
    Submit(SubmitOutcome),
    /// The acknowledge request was handled.
    Acknowledge(Result<(), TransitionError>),
}

/// Error returned when an event script line cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEventError {
    /// The line is empty.
    Empty,
    /// The first word is not `input`, `submit` or `ack`.
    UnknownCommand(String),
    /// `input` without a field name.
    MissingField,
    /// `input` with an unknown field name.
    Field(ParseFieldError),
}

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty event"),
            Self::UnknownCommand(cmd) => {
                write!(f, "unknown event '{}' (expected input, submit or ack)", cmd)
            }
            Self::MissingField => write!(f, "input event needs a field name"),
            Self::Field(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseEventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseFieldError> for ParseEventError {
    fn from(e: ParseFieldError) -> Self {
        Self::Field(e)
    }
}

impl FromStr for UiEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command {
            "" => Err(ParseEventError::Empty),
            "submit" => Ok(Self::Submit),
            "ack" | "acknowledge" => Ok(Self::Acknowledge),
            "input" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ParseEventError::MissingField);
                }
                Ok(Self::Input {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            other => Err(ParseEventError::UnknownCommand(other.to_string())),
        }
    }
}

/// Routes UI events into a form controller and renders the result.
pub struct Dispatcher<C, S> {
    form: FormController<C>,
    surface: S,
}

impl<C: Clock, S: Surface> Dispatcher<C, S> {
    /// Wraps a controller and a surface, rendering the initial view.
    pub fn new(form: FormController<C>, surface: S) -> Self {
        let mut dispatcher = Self { form, surface };
        dispatcher.render();
        dispatcher
    }

    /// Applies one event and re-renders the surface.
    pub fn dispatch(&mut self, event: &UiEvent) -> Dispatched {
        let result = match event {
            UiEvent::Input { field, value } => {
                Dispatched::Input(self.form.apply_input(*field, value))
            }
            UiEvent::Submit => Dispatched::Submit(self.form.submit()),
            UiEvent::Acknowledge => Dispatched::Acknowledge(self.form.acknowledge()),
        };
        self.render();
        result
    }

    /// Pushes the full current view to the surface.
    pub fn render(&mut self) {
        render(&self.form.view(), &mut self.surface);
    }

    /// Returns the controller.
    pub fn form(&self) -> &FormController<C> {
        &self.form
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Splits the dispatcher back into its parts.
    pub fn into_parts(self) -> (FormController<C>, S) {
        (self.form, self.surface)
    }
}

/// Renders a view onto a surface.
pub fn render<S: Surface + ?Sized>(view: &FormView, surface: &mut S) {
    for input in &view.inputs {
        surface.set_input_value(input.field, &input.value);
    }
    for error in &view.errors {
        surface.set_error(error.slot, error.message);
    }
    for field in Field::ALL {
        if let Some(text) = view.preview.get(field) {
            surface.set_preview(field, text);
        }
    }
    surface.show_panel(view.panel);
}
