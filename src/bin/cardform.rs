//! CLI tool for the card form.
//!
//! # Usage
//!
//! ```bash
//! # Validate one field
//! cardform check name "Jane Appleseed"
//!
//! # Validate an expiry month and year
//! cardform expiry 09 27 --today 2025-06
//!
//! # Format a card number as the form would
//! cardform format 1234567890123456
//!
//! # Submit a whole form
//! cardform submit --name "Jane Appleseed" --number 1234567890123456 \
//!     --month 09 --year 27 --cvc 123 --output json
//!
//! # Replay a scripted session from stdin
//! printf 'input name Jane Appleseed\nsubmit\n' | cardform session
//! ```
//!
//! Set `RUST_LOG=card_form=debug` to trace validation on stderr.

use card_form::dispatch::{Dispatched, Dispatcher, Surface, UiEvent};
use card_form::expiry::{validate_expiration, Clock, FixedClock, SystemClock, YearMonth};
use card_form::{format, ErrorSlot, Field, FormController, FormView, Panel, SubmitOutcome};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Credit card form validation tool")]
struct Cli {
    /// Pin the current month used for expiry checks (YYYY-MM)
    #[arg(long, global = true)]
    today: Option<YearMonth>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single field
    Check {
        /// Field name
        field: FieldArg,

        /// Value as typed
        value: String,
    },

    /// Validate an expiry month and year together
    Expiry {
        /// Two-digit month
        month: String,

        /// Two-digit year
        year: String,
    },

    /// Format a card number in groups of four
    Format {
        /// Card number as typed
        card_number: String,
    },

    /// Fill in every field and submit the form
    Submit {
        /// Cardholder name
        #[arg(long, default_value = "")]
        name: String,

        /// Card number
        #[arg(long, default_value = "")]
        number: String,

        /// Expiry month
        #[arg(long, default_value = "")]
        month: String,

        /// Expiry year
        #[arg(long, default_value = "")]
        year: String,

        /// Card verification code
        #[arg(long, default_value = "")]
        cvc: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Read events from stdin (`input <field> <value>`, `submit`, `ack`)
    Session {
        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Name,
    Number,
    Month,
    Year,
    Cvc,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Name => Field::Name,
            FieldArg::Number => Field::Number,
            FieldArg::Month => Field::Month,
            FieldArg::Year => Field::Year,
            FieldArg::Cvc => Field::Cvc,
        }
    }
}

/// Clock chosen from `--today`.
enum CliClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for CliClock {
    fn today(&self) -> YearMonth {
        match self {
            Self::System(c) => c.today(),
            Self::Fixed(c) => c.today(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let clock = match cli.today {
        Some(today) => CliClock::Fixed(FixedClock(today)),
        None => CliClock::System(SystemClock),
    };

    match cli.command {
        Commands::Check { field, value } => cmd_check(field.into(), &value),
        Commands::Expiry { month, year } => cmd_expiry(&month, &year, &clock),
        Commands::Format { card_number } => cmd_format(&card_number),
        Commands::Submit {
            name,
            number,
            month,
            year,
            cvc,
            output,
        } => cmd_submit([name, number, month, year, cvc], output, clock),
        Commands::Session { output } => cmd_session(output, clock),
    }
}

fn cmd_check(field: Field, value: &str) -> ExitCode {
    match card_form::validate_field(field, value) {
        Ok(()) => {
            println!("Valid: yes");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_expiry(month: &str, year: &str, clock: &CliClock) -> ExitCode {
    let today = clock.today();
    match validate_expiration(month, year, today) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Expiry: {}", exp.format_short());
            println!("Months Until Expiry: {}", exp.months_until_expiry(today));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_format(card_number: &str) -> ExitCode {
    println!("{}", format::format_card_number(card_number));
    ExitCode::SUCCESS
}

fn cmd_submit(values: [String; 5], output: OutputFormat, clock: CliClock) -> ExitCode {
    let mut form = FormController::with_clock(clock);
    for (field, value) in Field::ALL.into_iter().zip(values.iter()) {
        form.apply_input(field, value);
    }

    let outcome = form.submit();
    print_view(&form.view(), output);

    match outcome {
        SubmitOutcome::Completed => ExitCode::SUCCESS,
        SubmitOutcome::Rejected(_) => ExitCode::FAILURE,
    }
}

fn cmd_session(output: OutputFormat, clock: CliClock) -> ExitCode {
    let mut dispatcher = Dispatcher::new(FormController::with_clock(clock), Transcript);
    let stdin = io::stdin();

    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to read stdin: {}", e);
                return ExitCode::from(2);
            }
        };
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let event: UiEvent = match line.parse() {
            Ok(event) => event,
            Err(e) => {
                eprintln!("Error: line {}: {}", lineno + 1, e);
                return ExitCode::from(2);
            }
        };

        println!("> {}", line.trim());
        if let Dispatched::Acknowledge(Err(e)) = dispatcher.dispatch(&event) {
            println!("ignored: {}", e);
        }
        print_view(&dispatcher.form().view(), output);
    }

    if dispatcher.form().is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Surface for the session transcript; the view is printed after each
/// event instead, so widget updates are only traced.
struct Transcript;

impl Surface for Transcript {
    fn set_input_value(&mut self, field: Field, _value: &str) {
        tracing::trace!(%field, "input updated");
    }

    fn set_error(&mut self, slot: ErrorSlot, message: Option<&str>) {
        tracing::trace!(%slot, ?message, "error region updated");
    }

    fn set_preview(&mut self, field: Field, _text: &str) {
        tracing::trace!(%field, "preview updated");
    }

    fn show_panel(&mut self, panel: Panel) {
        tracing::trace!(?panel, "panel shown");
    }
}

fn print_view(view: &FormView, output: OutputFormat) {
    match output {
        OutputFormat::Text => print_text(view),
        OutputFormat::Json => match serde_json::to_string_pretty(view) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: failed to encode view: {}", e),
        },
    }
}

fn print_text(view: &FormView) {
    println!("State: {}", view.state);
    println!(
        "Card: {} | {} | {}/{}",
        view.preview.name(),
        view.preview.number(),
        view.preview.month(),
        view.preview.year()
    );
    for error in view.errors.iter().filter(|e| e.is_visible()) {
        if let Some(message) = error.message {
            println!("Error ({}): {}", error.slot, message);
        }
    }
}
