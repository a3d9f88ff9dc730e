//! CLI tool for payment card validation.
//!
//! # Usage
//!
//! ```bash
//! # Classify a card number
//! cardcheck classify 4242424242424242
//!
//! # Validate a number on its own
//! cardcheck number "4242 4242 4242 4242"
//!
//! # Validate a CVC for a network
//! cardcheck cvc 1234 --network amex
//!
//! # Validate an expiry date
//! cardcheck expiry 12/30 --today 2024-06
//!
//! # Validate a whole card
//! cardcheck card 4242424242424242 --expiry 12/30 --cvc 123 --output json
//! ```
//!
//! Exits with 0 when the input is valid, 1 when it is invalid and 2 on
//! argument errors. Set `RUST_LOG=debug` to see validation events on stderr.

use std::process::ExitCode;

use cardcheck::expiry::{self, RawExpiry, ReferenceDate};
use cardcheck::mask::mask_number;
use cardcheck::normalize::format_number;
use cardcheck::{
    check_number, classify, validate_cvc, CardInput, CardNetwork, CardValidator, Check,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_VALID: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Payment card validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a card number by its leading digits
    Classify {
        /// Card number, classified exactly as given
        card_number: String,
    },

    /// Validate a card number (checksum and length)
    Number {
        /// Card number to validate (spaces and dashes allowed)
        card_number: String,
    },

    /// Validate a CVC
    Cvc {
        /// CVC to validate
        cvc: String,

        /// Card network (affects valid length); accepts any 3 or 4 digits if omitted
        #[arg(short, long)]
        network: Option<CardNetwork>,
    },

    /// Validate an expiry date
    Expiry {
        /// Expiry date (MM/YY, MM/YYYY, MMYY, MMYYYY)
        date: String,

        /// Reference month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        today: Option<ReferenceDate>,
    },

    /// Validate a whole card
    Card {
        /// Card number (spaces and dashes allowed)
        card_number: String,

        /// Expiry date (MM/YY, MM/YYYY, MMYY, MMYYYY); two-digit years are
        /// read the same way as in `expiry`
        #[arg(short, long)]
        expiry: RawExpiry,

        /// CVC, checked only when given
        #[arg(short, long)]
        cvc: Option<String>,

        /// Reference month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        today: Option<ReferenceDate>,

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

#[derive(Serialize)]
struct CardSummary {
    valid: bool,
    network: Option<CardNetwork>,
    masked: String,
    reference: String,
    failures: Vec<Check>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Classify { card_number } => cmd_classify(&card_number),
        Commands::Number { card_number } => cmd_number(&card_number),
        Commands::Cvc { cvc, network } => cmd_cvc(&cvc, network),
        Commands::Expiry { date, today } => {
            cmd_expiry(&date, today.unwrap_or_else(ReferenceDate::today))
        }
        Commands::Card {
            card_number,
            expiry,
            cvc,
            today,
            output,
        } => {
            let today = today.unwrap_or_else(ReferenceDate::today);
            match card_input(card_number, expiry, cvc, today) {
                Ok(input) => cmd_card(&input, today, output),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    EXIT_USAGE
                }
            }
        }
    };

    ExitCode::from(code)
}

fn verdict(valid: bool) -> u8 {
    if valid {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

fn cmd_classify(card_number: &str) -> u8 {
    match classify(card_number) {
        Some(network) => {
            println!("Network: {}", network);
            EXIT_VALID
        }
        None => {
            println!("Network: absent");
            EXIT_INVALID
        }
    }
}

fn cmd_number(card_number: &str) -> u8 {
    let result = check_number(card_number);
    let valid = result.is_ok();

    println!("Valid: {}", if valid { "yes" } else { "no" });
    if let Some(network) = classify(card_number) {
        println!("Network: {}", network);
    }
    println!("Masked: {}", mask_number(card_number));
    match result {
        Ok(_) => println!("Formatted: {}", format_number(card_number, " ")),
        Err(check) => println!("Error: {}", check),
    }

    verdict(valid)
}

fn cmd_cvc(cvc: &str, network: Option<CardNetwork>) -> u8 {
    let valid = validate_cvc(cvc, network);
    println!("Valid: {}", if valid { "yes" } else { "no" });
    if let Err(check) = cardcheck::cvc::check_cvc(cvc, network) {
        println!("Error: {}", check);
    }
    verdict(valid)
}

fn cmd_expiry(date: &str, today: ReferenceDate) -> u8 {
    match expiry::validate_expiry(date, today) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {:02}", exp.month());
            println!("Year: {}", exp.year());
            println!("Formatted: {}", exp.format_short());
            println!("Months Until Expiry: {}", exp.months_until_expiry(today));
            EXIT_VALID
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            EXIT_INVALID
        }
    }
}

fn cmd_card(input: &CardInput, today: ReferenceDate, output: OutputFormat) -> u8 {
    let validator = CardValidator::new(input, today);
    let report = validator.report();
    let valid = validator.validate_all();

    let summary = CardSummary {
        valid,
        network: validator.network(),
        masked: input.number.as_deref().map(mask_number).unwrap_or_default(),
        reference: today.to_string(),
        failures: report.failures().collect(),
    };

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if summary.valid { "yes" } else { "no" });
            match summary.network {
                Some(network) => println!("Network: {}", network),
                None => println!("Network: absent"),
            }
            println!("Masked: {}", summary.masked);
            println!("Reference: {}", summary.reference);
            println!("Report: {}", report);
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return EXIT_USAGE;
            }
        },
    }

    verdict(valid)
}

/// Builds the card input with the expiry year expanded against `today`.
fn card_input(
    card_number: String,
    expiry: RawExpiry,
    cvc: Option<String>,
    today: ReferenceDate,
) -> Result<CardInput, expiry::ExpiryError> {
    let expiry = expiry.resolve(today)?;
    Ok(CardInput {
        number: Some(card_number),
        exp_month: Some(i32::from(expiry.month())),
        exp_year: Some(i32::from(expiry.year())),
        cvc,
    })
}
