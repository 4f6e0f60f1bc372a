//! WebAssembly bindings for the card form.
//!
//! The page keeps its DOM wiring in JavaScript and asks a `CardForm` what to
//! show after every event.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { CardForm } from 'card_form';
//!
//! await init();
//! const form = new CardForm();
//!
//! numberInput.addEventListener("input", (e) => {
//!     const result = form.input("number", e.target.value);
//!     e.target.value = result.value;              // reformatted "1234 5678"
//!     showError(result.slot, result.error);       // null clears the region
//!     cardNumber.textContent = form.preview_number;
//! });
//!
//! appForm.addEventListener("submit", (e) => {
//!     e.preventDefault();
//!     const result = form.submit();
//!     if (result.completed) { showComplete(); }
//!     else { result.slots.forEach((slot, i) => showError(slot, result.messages[i])); }
//! });
//!
//! continueButton.addEventListener("click", () => form.acknowledge());
//! ```

#![cfg(feature = "wasm")]

use crate::expiry::{validate_expiration_now, SystemClock};
use crate::form::{FormController, SubmitOutcome};
use crate::{ErrorSlot, Field};
use wasm_bindgen::prelude::*;

fn parse_field(name: &str) -> Result<Field, JsValue> {
    name.parse::<Field>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Result of one input event, returned to JavaScript.
#[wasm_bindgen]
pub struct InputResult {
    value: String,
    slot: &'static str,
    error: Option<String>,
    preview_updated: bool,
}

#[wasm_bindgen]
impl InputResult {
    /// Text to write back into the input.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.value.clone()
    }

    /// Error region the input reports into.
    #[wasm_bindgen(getter)]
    pub fn slot(&self) -> String {
        self.slot.to_string()
    }

    /// Message to show, or `undefined` to hide the region.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }

    /// True if preview text changed.
    #[wasm_bindgen(getter)]
    pub fn preview_updated(&self) -> bool {
        self.preview_updated
    }
}

/// Result of a submit, returned to JavaScript.
#[wasm_bindgen]
pub struct SubmitResult {
    completed: bool,
    slots: Vec<&'static str>,
    messages: Vec<&'static str>,
}

#[wasm_bindgen]
impl SubmitResult {
    /// True if the completion panel should be shown.
    #[wasm_bindgen(getter)]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Failing error regions, in display order.
    #[wasm_bindgen(getter)]
    pub fn slots(&self) -> js_sys::Array {
        self.slots.iter().map(|s| JsValue::from_str(s)).collect()
    }

    /// Messages for each entry of `slots`.
    #[wasm_bindgen(getter)]
    pub fn messages(&self) -> js_sys::Array {
        self.messages.iter().map(|m| JsValue::from_str(m)).collect()
    }
}

/// A card form bound to the browser clock.
#[wasm_bindgen]
pub struct CardForm {
    inner: FormController<SystemClock>,
}

#[wasm_bindgen]
impl CardForm {
    /// Creates an empty form in the editing state.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CardForm {
        CardForm {
            inner: FormController::new(),
        }
    }

    /// Handles an input event on the named field.
    pub fn input(&mut self, field: &str, value: &str) -> Result<InputResult, JsValue> {
        let outcome = self.inner.apply_input(parse_field(field)?, value);
        Ok(InputResult {
            slot: outcome.slot.name(),
            error: outcome.error.map(|e| e.message().to_string()),
            preview_updated: outcome.preview_updated,
            value: outcome.value,
        })
    }

    /// Validates every field and switches to the completion panel on success.
    pub fn submit(&mut self) -> SubmitResult {
        match self.inner.submit() {
            SubmitOutcome::Completed => SubmitResult {
                completed: true,
                slots: Vec::new(),
                messages: Vec::new(),
            },
            SubmitOutcome::Rejected(errors) => SubmitResult {
                completed: false,
                slots: errors.iter().map(|e| e.slot.name()).collect(),
                messages: errors.iter().map(|e| e.error.message()).collect(),
            },
        }
    }

    /// Resets the form after completion. Returns false if the form was not
    /// completed.
    pub fn acknowledge(&mut self) -> bool {
        self.inner.acknowledge().is_ok()
    }

    /// True while the completion panel is shown.
    #[wasm_bindgen(getter)]
    pub fn completed(&self) -> bool {
        self.inner.is_completed()
    }

    /// Current text of the named input.
    pub fn input_value(&self, field: &str) -> Result<String, JsValue> {
        Ok(self.inner.values().get(parse_field(field)?).to_string())
    }

    /// Message shown in an error region (`name`, `number`, `expiry`, `cvc`).
    pub fn error_message(&self, slot: &str) -> Result<Option<String>, JsValue> {
        let slot = ErrorSlot::ALL
            .into_iter()
            .find(|s| s.name() == slot)
            .ok_or_else(|| JsValue::from_str(&format!("unknown error region: {}", slot)))?;
        Ok(self.inner.error(slot).map(|e| e.message().to_string()))
    }

    /// Preview cardholder name.
    #[wasm_bindgen(getter)]
    pub fn preview_name(&self) -> String {
        self.inner.preview().name().to_string()
    }

    /// Preview card number.
    #[wasm_bindgen(getter)]
    pub fn preview_number(&self) -> String {
        self.inner.preview().number().to_string()
    }

    /// Preview expiry month.
    #[wasm_bindgen(getter)]
    pub fn preview_month(&self) -> String {
        self.inner.preview().month().to_string()
    }

    /// Preview expiry year.
    #[wasm_bindgen(getter)]
    pub fn preview_year(&self) -> String {
        self.inner.preview().year().to_string()
    }
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Regroups card number input in blocks of four.
#[wasm_bindgen]
pub fn format_card_number(input: &str) -> String {
    crate::format::format_card_number(input)
}

/// Validates one field on its own. Returns the message, or `undefined` if valid.
#[wasm_bindgen]
pub fn validate_field(field: &str, value: &str) -> Result<Option<String>, JsValue> {
    let field = parse_field(field)?;
    Ok(crate::rules::validate(field, value).map(|e| e.message().to_string()))
}

/// Validates an expiry month and year against today's date. Returns the
/// message, or `undefined` if valid.
#[wasm_bindgen]
pub fn validate_expiration(month: &str, year: &str) -> Option<String> {
    validate_expiration_now(month, year)
        .err()
        .map(|e| e.message().to_string())
}
