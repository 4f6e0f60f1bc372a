//! Integration tests for card_form.
//!
//! These drive the form the way a UI does: keystroke by keystroke, then
//! submit and acknowledge, checking what the user would see at each step.

use card_form::dispatch::{Dispatched, Dispatcher, Surface, UiEvent};
use card_form::expiry::{validate_expiration, FixedClock, YearMonth};
use card_form::{
    format, rules, CardPreview, ErrorSlot, Field, FieldError, FormController, FormOptions,
    FormState, Panel, RuleSet, SubmitOutcome, TransitionError,
};

fn today() -> YearMonth {
    YearMonth::new(2025, 6).unwrap()
}

fn form() -> FormController<FixedClock> {
    FormController::with_clock(FixedClock(today()))
}

/// Feeds `text` into a field one character at a time, as a browser would.
fn type_into(form: &mut FormController<FixedClock>, field: Field, text: &str) {
    let mut current = form.values().get(field).to_string();
    for c in text.chars() {
        current.push(c);
        let outcome = form.apply_input(field, &current);
        current = outcome.value;
    }
}

fn fill_valid(form: &mut FormController<FixedClock>) {
    type_into(form, Field::Name, "Jane Appleseed");
    type_into(form, Field::Number, "1234567890123456");
    type_into(form, Field::Month, "09");
    type_into(form, Field::Year, "27");
    type_into(form, Field::Cvc, "123");
}

// =============================================================================
// VALIDATION RULES
// =============================================================================

#[test]
fn test_error_messages_are_fixed() {
    let cases = [
        (Field::Name, "", "Can't be blank"),
        (Field::Name, "Bartholomew Montgomery", "Too long"),
        (Field::Name, "Jane", "Wrong format"),
        (Field::Number, "", "Can't be blank"),
        (Field::Number, "1234 5678 9012", "Wrong format, 16 digits required"),
        (Field::Cvc, "", "Can't be blank"),
        (Field::Cvc, "12a", "Must be 3 digits"),
    ];

    for (field, value, message) in cases {
        let error = rules::validate(field, value).unwrap_or_else(|| panic!("{field} {value:?} should fail"));
        assert_eq!(error.to_string(), message, "{field} {value:?}");
    }
}

#[test]
fn test_name_boundaries() {
    // Exactly 20 characters.
    assert_eq!(rules::validate(Field::Name, "Maximilian Abernathy"), None);
    // 21 characters.
    assert_eq!(
        rules::validate(Field::Name, "Maximilian Abernathys"),
        Some(FieldError::TooLong)
    );
    // Tab is whitespace too.
    assert_eq!(rules::validate(Field::Name, "Jane\tAppleseed"), None);
    assert_eq!(
        rules::validate(Field::Name, "Jane-Marie Appleseed"),
        Some(FieldError::WrongFormat(Field::Name))
    );
}

#[test]
fn test_expiry_against_fixed_date() {
    assert_eq!(
        validate_expiration("13", "25", today()),
        Err(FieldError::InvalidMonth)
    );
    assert_eq!(
        validate_expiration("06", "abc", today()),
        Err(FieldError::InvalidYear)
    );
    assert_eq!(
        validate_expiration("05", "25", today()),
        Err(FieldError::Expired)
    );
    assert!(validate_expiration("06", "25", today()).is_ok());
    assert!(validate_expiration("07", "25", today()).is_ok());
}

#[test]
fn test_expiry_year_boundary() {
    let january = YearMonth::new(2026, 1).unwrap();
    assert_eq!(
        validate_expiration("12", "25", january),
        Err(FieldError::Expired)
    );
    assert!(validate_expiration("01", "26", january).is_ok());
}

// =============================================================================
// REAL-TIME INPUT
// =============================================================================

#[test]
fn test_typing_number_formats_every_keystroke() {
    let mut form = form();
    let mut seen = Vec::new();
    let mut current = String::new();

    for c in "12345".chars() {
        current.push(c);
        let outcome = form.apply_input(Field::Number, &current);
        current = outcome.value.clone();
        seen.push(outcome.value);
    }

    assert_eq!(seen, vec!["1", "12", "123", "1234", "1234 5"]);
}

#[test]
fn test_typing_number_error_clears_on_sixteenth_digit() {
    let mut form = form();
    type_into(&mut form, Field::Number, "123456789012345");
    assert_eq!(
        form.error(ErrorSlot::Number),
        Some(FieldError::WrongFormat(Field::Number))
    );
    assert_eq!(form.preview().number(), "0000 0000 0000 0000");

    type_into(&mut form, Field::Number, "6");
    assert_eq!(form.error(ErrorSlot::Number), None);
    assert_eq!(form.preview().number(), "1234 5678 9012 3456");

    // A seventeenth digit breaks the pattern; the preview keeps the last valid value.
    type_into(&mut form, Field::Number, "7");
    assert_eq!(form.values().get(Field::Number), "1234 5678 9012 3456 7");
    assert_eq!(
        form.error(ErrorSlot::Number),
        Some(FieldError::WrongFormat(Field::Number))
    );
    assert_eq!(form.preview().number(), "1234 5678 9012 3456");
}

#[test]
fn test_typing_name_preview_tracks_valid_prefixes() {
    let mut form = form();
    type_into(&mut form, Field::Name, "Jo B");
    assert_eq!(form.preview().name(), "Jo B");

    // "Jo B." is invalid: the preview stays at "Jo B".
    type_into(&mut form, Field::Name, ".");
    assert_eq!(form.preview().name(), "Jo B");
    assert!(form.error(ErrorSlot::Name).is_some());
}

#[test]
fn test_month_and_year_share_error_region() {
    let mut form = form();
    form.apply_input(Field::Month, "05");
    form.apply_input(Field::Year, "25");
    assert_eq!(form.error(ErrorSlot::Expiry), Some(FieldError::Expired));

    // Fixing the month clears the shared region.
    form.apply_input(Field::Month, "08");
    assert_eq!(form.error(ErrorSlot::Expiry), None);
    assert_eq!(form.preview().month(), "08");
    assert_eq!(form.preview().year(), "25");

    let view = form.view();
    assert!(!view.input(Field::Month).unwrap().error_class);
    assert!(!view.input(Field::Year).unwrap().error_class);
}

#[test]
fn test_cvc_never_reaches_preview() {
    let mut form = form();
    let outcome = form.apply_input(Field::Cvc, "123");
    assert!(outcome.is_valid());
    assert!(!outcome.preview_updated);
    assert_eq!(form.preview(), &CardPreview::default());
}

// =============================================================================
// SUBMIT / ACKNOWLEDGE
// =============================================================================

#[test]
fn test_submit_valid_form_completes() {
    let mut form = form();
    fill_valid(&mut form);

    assert_eq!(form.submit(), SubmitOutcome::Completed);
    let view = form.view();
    assert_eq!(view.state, FormState::Completed);
    assert_eq!(view.panel, Panel::Complete);
    assert!(view.errors.iter().all(|e| !e.is_visible()));
}

#[test]
fn test_submit_reports_expired_card() {
    let mut form = form();
    type_into(&mut form, Field::Name, "Jane Appleseed");
    type_into(&mut form, Field::Number, "1234567890123456");
    form.apply_input(Field::Month, "01");
    form.apply_input(Field::Year, "25");
    form.apply_input(Field::Cvc, "123");

    let outcome = form.submit();
    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].slot, ErrorSlot::Expiry);
    assert_eq!(outcome.errors()[0].error, FieldError::Expired);
    assert_eq!(form.view().panel, Panel::Form);
}

#[test]
fn test_resubmit_after_fix() {
    let mut form = form();
    fill_valid(&mut form);
    form.apply_input(Field::Cvc, "12");
    assert!(!form.submit().is_completed());

    form.apply_input(Field::Cvc, "129");
    assert!(form.submit().is_completed());
}

#[test]
fn test_panels_are_never_both_visible() {
    let mut form = form();
    let mut panels = vec![form.view().panel];

    form.submit();
    panels.push(form.view().panel);
    fill_valid(&mut form);
    form.submit();
    panels.push(form.view().panel);
    form.acknowledge().unwrap();
    panels.push(form.view().panel);

    assert_eq!(
        panels,
        vec![Panel::Form, Panel::Form, Panel::Complete, Panel::Form]
    );
}

#[test]
fn test_acknowledge_restores_placeholders() {
    let mut form = form();
    fill_valid(&mut form);
    form.submit();
    form.acknowledge().unwrap();

    let preview = form.preview();
    assert_eq!(preview.name(), "Jane Appleseed");
    assert_eq!(preview.number(), "0000 0000 0000 0000");
    assert_eq!(preview.month(), "00");
    assert_eq!(preview.year(), "00");
    assert!(form.values().is_empty());
    assert_eq!(form.state(), FormState::Editing);
}

#[test]
fn test_acknowledge_requires_completion() {
    let mut form = form();
    assert_eq!(form.acknowledge(), Err(TransitionError::NotCompleted));
}

#[test]
fn test_second_round_after_acknowledge() {
    let mut form = form();
    fill_valid(&mut form);
    form.submit();
    form.acknowledge().unwrap();

    // Everything is blank again.
    assert_eq!(form.submit().errors().len(), 4);

    fill_valid(&mut form);
    assert!(form.submit().is_completed());
}

#[test]
fn test_input_and_submit_use_same_rules() {
    let rules = RuleSet::standard().with_name_max_length(8);
    let options = FormOptions {
        rules,
        ..FormOptions::default()
    };
    let mut form = FormController::with_options(options, FixedClock(today()));

    let outcome = form.apply_input(Field::Name, "Jane Appleseed");
    assert_eq!(outcome.error, Some(FieldError::TooLong));

    let submit = form.submit();
    assert!(submit
        .errors()
        .iter()
        .any(|e| e.slot == ErrorSlot::Name && e.error == FieldError::TooLong));
}

// =============================================================================
// DISPATCHER
// =============================================================================

#[derive(Default)]
struct DomStub {
    number_input: String,
    number_error: Option<String>,
    expiry_error: Option<String>,
    card_number: String,
    panel: Option<Panel>,
}

impl Surface for DomStub {
    fn set_input_value(&mut self, field: Field, value: &str) {
        if field == Field::Number {
            self.number_input = value.to_string();
        }
    }

    fn set_error(&mut self, slot: ErrorSlot, message: Option<&str>) {
        match slot {
            ErrorSlot::Number => self.number_error = message.map(str::to_string),
            ErrorSlot::Expiry => self.expiry_error = message.map(str::to_string),
            _ => {}
        }
    }

    fn set_preview(&mut self, field: Field, text: &str) {
        if field == Field::Number {
            self.card_number = text.to_string();
        }
    }

    fn show_panel(&mut self, panel: Panel) {
        self.panel = Some(panel);
    }
}

#[test]
fn test_dispatcher_script() {
    let mut dispatcher = Dispatcher::new(form(), DomStub::default());

    let script = [
        "input number 4111 1111",
        "input month 13",
        "input year 30",
    ];
    for line in script {
        dispatcher.dispatch(&line.parse::<UiEvent>().unwrap());
    }

    let dom = dispatcher.surface();
    assert_eq!(dom.number_input, "4111 1111");
    assert_eq!(dom.number_error.as_deref(), Some("Wrong format, 16 digits required"));
    assert_eq!(dom.expiry_error.as_deref(), Some("Invalid month"));
    assert_eq!(dom.card_number, "0000 0000 0000 0000");

    let result = dispatcher.dispatch(&UiEvent::Submit);
    assert!(matches!(result, Dispatched::Submit(SubmitOutcome::Rejected(_))));
    assert_eq!(dispatcher.surface().panel, Some(Panel::Form));

    let (form, _) = dispatcher.into_parts();
    assert_eq!(form.state(), FormState::Editing);
}

#[test]
fn test_format_helpers_agree_with_controller() {
    let mut form = form();
    let raw = "4111-1111-1111-1111";
    let outcome = form.apply_input(Field::Number, raw);
    assert_eq!(outcome.value, format::format_card_number(raw));
    assert_eq!(format::strip_formatting(&outcome.value), "4111111111111111");
}
