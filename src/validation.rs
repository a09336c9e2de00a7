use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    form::{fields_for, Field, RegistrationInput, Role},
    messages,
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_SHOP_DESCRIPTION_LEN: usize = 500;

/// Field-level validation failures, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(BTreeMap<Field, String>);

fn join_errors(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        // First failing rule wins.
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validation rules for the registration form. Implementations decide the
/// field rules; the controller only relies on the per-field error map.
pub trait RegistrationSchema: Send + Sync {
    fn validate(&self, input: &RegistrationInput) -> Result<(), ValidationErrors>;
}

impl<F> RegistrationSchema for F
where
    F: Fn(&RegistrationInput) -> Result<(), ValidationErrors> + Send + Sync,
{
    fn validate(&self, input: &RegistrationInput) -> Result<(), ValidationErrors> {
        self(input)
    }
}

/// Storefront rules, shared by the form and the reference endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSchema;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{9,15}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

fn is_valid_postal_code(code: &str) -> bool {
    lazy_static! {
        static ref POSTAL_RE: Regex = Regex::new(r"^[0-9]{5}$").unwrap();
    }
    POSTAL_RE.is_match(code)
}

fn is_valid_shop_slug(slug: &str) -> bool {
    lazy_static! {
        static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    }
    SLUG_RE.is_match(slug)
}

fn required_message(field: Field) -> &'static str {
    match field {
        Field::Name => messages::NAME_REQUIRED,
        Field::Email => messages::EMAIL_REQUIRED,
        Field::Password => messages::PASSWORD_REQUIRED,
        Field::ShopName => messages::SHOP_NAME_REQUIRED,
        _ => messages::FIELD_REQUIRED,
    }
}

impl DefaultSchema {
    fn check_required(input: &RegistrationInput, errors: &mut ValidationErrors) {
        let role = input.role();
        for field in fields_for(role) {
            if field.is_required(role) && input.get(*field).trim().is_empty() {
                errors.add(*field, required_message(*field));
            }
        }
    }

    fn check_account(input: &RegistrationInput, errors: &mut ValidationErrors) {
        let email = input.get(Field::Email).trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.add(Field::Email, messages::EMAIL_INVALID);
        }

        if input.get(Field::Password).chars().count() < MIN_PASSWORD_LEN {
            errors.add(Field::Password, messages::PASSWORD_TOO_SHORT);
        }

        let phone = input.get(Field::PhoneNumber).trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.add(Field::PhoneNumber, messages::PHONE_INVALID);
        }

        let postal = input.get(Field::PostalCode).trim();
        if !postal.is_empty() && !is_valid_postal_code(postal) {
            errors.add(Field::PostalCode, messages::POSTAL_CODE_INVALID);
        }
    }

    fn check_shop(input: &RegistrationInput, errors: &mut ValidationErrors) {
        let slug = input.get(Field::ShopUrl).trim();
        if !slug.is_empty() && !is_valid_shop_slug(slug) {
            errors.add(Field::ShopUrl, messages::SHOP_URL_INVALID);
        }

        if input.get(Field::ShopDescription).chars().count() > MAX_SHOP_DESCRIPTION_LEN {
            errors.add(Field::ShopDescription, messages::SHOP_DESCRIPTION_TOO_LONG);
        }
    }
}

impl RegistrationSchema for DefaultSchema {
    fn validate(&self, input: &RegistrationInput) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        Self::check_required(input, &mut errors);
        Self::check_account(input, &mut errors);
        match input.role() {
            Role::Seller => Self::check_shop(input, &mut errors),
            Role::Customer => {}
        }
        errors.into_result()
    }
}
