//! Interactive input
//!
//! Commands read input through the [`Prompt`] trait so the session logic can
//! be driven by scripted answers in tests. [`InquirePrompt`] is the terminal
//! implementation.

use crate::error::{CliError, Result};
use crate::menu::MenuItem;
use inquire::validator::Validation;
use inquire::{CustomType, Password, PasswordDisplayMode, Select, Text};
use std::str::FromStr;

const KEEP_HELP: &str = "Leave empty to keep the current value";

/// Source of user input
pub trait Prompt {
    /// Non-empty text, trimmed
    fn text(&mut self, message: &str) -> Result<String>;

    /// Text, or `None` when left empty
    fn optional_text(&mut self, message: &str) -> Result<Option<String>>;

    fn integer(&mut self, message: &str) -> Result<i64>;

    fn optional_integer(&mut self, message: &str) -> Result<Option<i64>>;

    fn number(&mut self, message: &str) -> Result<f64>;

    fn optional_number(&mut self, message: &str) -> Result<Option<f64>>;

    /// Masked input, trimmed
    fn password(&mut self, message: &str) -> Result<String>;

    fn choose(&mut self, message: &str, items: Vec<MenuItem>) -> Result<MenuItem>;
}

/// Parse an optional field: blank means `None`
pub fn parse_optional<T: FromStr>(raw: &str) -> Result<Option<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| CliError::invalid_input(format!("'{}' is not a valid value", trimmed)))
}

fn non_empty(input: &str) -> std::result::Result<Validation, inquire::CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Input cannot be empty".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn blank_or<T: FromStr>(
    error: &'static str,
) -> impl Fn(&str) -> std::result::Result<Validation, inquire::CustomUserError> + Clone {
    move |input: &str| {
        if parse_optional::<T>(input).is_ok() {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid(error.into()))
        }
    }
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn text(&mut self, message: &str) -> Result<String> {
        let value = Text::new(message).with_validator(non_empty).prompt()?;
        Ok(value.trim().to_string())
    }

    fn optional_text(&mut self, message: &str) -> Result<Option<String>> {
        let value = Text::new(message).with_help_message(KEEP_HELP).prompt()?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn integer(&mut self, message: &str) -> Result<i64> {
        Ok(CustomType::<i64>::new(message)
            .with_error_message("Please enter a whole number")
            .prompt()?)
    }

    fn optional_integer(&mut self, message: &str) -> Result<Option<i64>> {
        let raw = Text::new(message)
            .with_help_message(KEEP_HELP)
            .with_validator(blank_or::<i64>("Please enter a whole number"))
            .prompt()?;
        parse_optional(&raw)
    }

    fn number(&mut self, message: &str) -> Result<f64> {
        Ok(CustomType::<f64>::new(message)
            .with_error_message("Please enter a numeric value")
            .prompt()?)
    }

    fn optional_number(&mut self, message: &str) -> Result<Option<f64>> {
        let raw = Text::new(message)
            .with_help_message(KEEP_HELP)
            .with_validator(blank_or::<f64>("Please enter a numeric value"))
            .prompt()?;
        parse_optional(&raw)
    }

    fn password(&mut self, message: &str) -> Result<String> {
        let value = Password::new(message)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;
        Ok(value.trim().to_string())
    }

    fn choose(&mut self, message: &str, items: Vec<MenuItem>) -> Result<MenuItem> {
        let page_size = items.len();
        Ok(Select::new(message, items).with_page_size(page_size).prompt()?)
    }
}
