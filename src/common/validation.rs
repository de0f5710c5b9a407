//! Field rules for a bid, shared by the desktop form and the API handlers.

use std::fmt;

pub const MAX_NAME_LEN: usize = 40;
pub const MIN_AMOUNT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidField {
    Name,
    Contact,
    Amount,
}

impl fmt::Display for BidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BidField::Name => "name",
            BidField::Contact => "contact",
            BidField::Amount => "amount",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: BidField,
    pub message: String,
}

impl FieldError {
    fn new(field: BidField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_name(name: &str) -> Result<String, FieldError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FieldError::new(BidField::Name, "Name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FieldError::new(
            BidField::Name,
            format!("Name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_contact(contact: &str) -> Result<String, FieldError> {
    let contact = contact.trim();
    if contact.is_empty() {
        return Err(FieldError::new(BidField::Contact, "Contact is required"));
    }
    Ok(contact.to_string())
}

/// Parses user-typed amounts; a lone comma is read as the decimal separator.
pub fn parse_amount(text: &str) -> Result<f64, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::new(BidField::Amount, "Amount is required"));
    }

    let normalized = if text.contains(',') && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text.to_string()
    };

    let amount = normalized
        .parse::<f64>()
        .map_err(|_| FieldError::new(BidField::Amount, "Amount must be a number"))?;
    validate_amount(amount)
}

pub fn validate_amount(amount: f64) -> Result<f64, FieldError> {
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(FieldError::new(
            BidField::Amount,
            format!("Amount must be at least {MIN_AMOUNT}"),
        ));
    }
    Ok(amount)
}

pub fn check_exceeds_highest(amount: f64, highest: Option<f64>) -> Result<(), FieldError> {
    match highest {
        Some(highest) if amount <= highest => Err(FieldError::new(
            BidField::Amount,
            format!("Bid must be higher than the current highest bid ({highest:.2})"),
        )),
        _ => Ok(()),
    }
}

/// Runs every field rule and collects all failures instead of stopping at the first.
pub fn validate_fields(
    name: &str,
    contact: &str,
    amount: Result<f64, FieldError>,
) -> Result<(String, String, f64), Vec<FieldError>> {
    let name = validate_name(name);
    let contact = validate_contact(contact);
    let amount = amount.and_then(validate_amount);

    match (name, contact, amount) {
        (Ok(name), Ok(contact), Ok(amount)) => Ok((name, contact, amount)),
        (name, contact, amount) => Err([name.err(), contact.err(), amount.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}
