//! Fuzz target for the form controller.
//!
//! Replays arbitrary event sequences and checks the view stays consistent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_form::expiry::{FixedClock, YearMonth};
use card_form::{Field, FormController, Panel};

#[derive(Arbitrary, Debug)]
enum Event {
    Input(u8, String),
    Submit,
    Acknowledge,
}

fuzz_target!(|events: Vec<Event>| {
    let Some(today) = YearMonth::new(2025, 6) else {
        return;
    };
    let mut form = FormController::with_clock(FixedClock(today));

    for event in events {
        match event {
            Event::Input(field, value) => {
                let field = Field::ALL[field as usize % Field::ALL.len()];
                form.apply_input(field, &value);
            }
            Event::Submit => {
                let outcome = form.submit();
                assert_eq!(outcome.is_completed(), form.is_completed());
            }
            Event::Acknowledge => {
                let was_completed = form.is_completed();
                assert_eq!(form.acknowledge().is_ok(), was_completed);
            }
        }

        let view = form.view();
        let expected = if form.is_completed() { Panel::Complete } else { Panel::Form };
        assert_eq!(view.panel, expected);
    }
});
