use std::collections::BTreeMap;

use super::{
    dto::{AccountFields, RegistrationPayload, ShopFields},
    fields::{fields_for, Field, Role},
};

/// Raw form state: one string per field, as typed by the user.
///
/// The role is fixed at construction. Shop fields are only seeded for sellers,
/// but nothing stops a caller from setting one on a customer form; such values
/// are dropped by [`RegistrationInput::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    role: Role,
    values: BTreeMap<Field, String>,
}

/// Fresh form state for `role` with every rendered field empty.
pub fn initialize(role: Role) -> RegistrationInput {
    RegistrationInput {
        role,
        values: fields_for(role)
            .iter()
            .map(|field| (*field, String::new()))
            .collect(),
    }
}

impl Default for RegistrationInput {
    fn default() -> Self {
        initialize(Role::default())
    }
}

impl RegistrationInput {
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current value of `field`, empty when the field was never seeded.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style [`RegistrationInput::set`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Shapes the raw state into the payload for this form's role. The role
    /// always comes from the form, and customer payloads never carry shop
    /// fields. Name and email are trimmed the same way the schema reads them.
    pub fn normalize(&self) -> RegistrationPayload {
        let account = AccountFields {
            name: self.get(Field::Name).trim().to_string(),
            email: self.get(Field::Email).trim().to_string(),
            password: self.get(Field::Password).to_string(),
            phone_number: self.get(Field::PhoneNumber).to_string(),
            address: self.get(Field::Address).to_string(),
            city: self.get(Field::City).to_string(),
            province: self.get(Field::Province).to_string(),
            postal_code: self.get(Field::PostalCode).to_string(),
        };
        match self.role {
            Role::Customer => RegistrationPayload::Customer(account),
            Role::Seller => RegistrationPayload::Seller {
                account,
                shop: ShopFields {
                    shop_name: self.get(Field::ShopName).to_string(),
                    shop_url: self.get(Field::ShopUrl).to_string(),
                    shop_description: self.get(Field::ShopDescription).to_string(),
                },
            },
        }
    }
}

impl From<&RegistrationPayload> for RegistrationInput {
    fn from(payload: &RegistrationPayload) -> Self {
        let account = payload.account();
        let mut input = initialize(payload.role())
            .with(Field::Name, account.name.as_str())
            .with(Field::Email, account.email.as_str())
            .with(Field::Password, account.password.as_str())
            .with(Field::PhoneNumber, account.phone_number.as_str())
            .with(Field::Address, account.address.as_str())
            .with(Field::City, account.city.as_str())
            .with(Field::Province, account.province.as_str())
            .with(Field::PostalCode, account.postal_code.as_str());
        if let Some(shop) = payload.shop() {
            input.set(Field::ShopName, shop.shop_name.as_str());
            input.set(Field::ShopUrl, shop.shop_url.as_str());
            input.set(Field::ShopDescription, shop.shop_description.as_str());
        }
        input
    }
}
