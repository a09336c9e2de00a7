use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::messages;

/// Account type a form is opened for. Fixed for the lifetime of a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Seller,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
        }
    }

    /// Notification text shown after a successful registration.
    pub fn success_message(self) -> &'static str {
        match self {
            Role::Seller => messages::SELLER_REGISTERED,
            Role::Customer => messages::CUSTOMER_REGISTERED,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "seller" => Ok(Role::Seller),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Every input the registration form can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    PhoneNumber,
    Address,
    City,
    Province,
    PostalCode,
    ShopName,
    ShopUrl,
    ShopDescription,
}

/// How a field is presented by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Tel,
    Url,
    TextArea,
}

const CUSTOMER_FIELDS: [Field; 8] = [
    Field::Name,
    Field::Email,
    Field::Password,
    Field::PhoneNumber,
    Field::Address,
    Field::City,
    Field::Province,
    Field::PostalCode,
];

const SELLER_FIELDS: [Field; 11] = [
    Field::Name,
    Field::Email,
    Field::Password,
    Field::PhoneNumber,
    Field::Address,
    Field::City,
    Field::Province,
    Field::PostalCode,
    Field::ShopName,
    Field::ShopUrl,
    Field::ShopDescription,
];

/// Fields rendered for `role`, in display order.
pub fn fields_for(role: Role) -> &'static [Field] {
    match role {
        Role::Customer => &CUSTOMER_FIELDS,
        Role::Seller => &SELLER_FIELDS,
    }
}

impl Field {
    /// Wire key, identical to the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PhoneNumber => "phone_number",
            Field::Address => "address",
            Field::City => "city",
            Field::Province => "province",
            Field::PostalCode => "postal_code",
            Field::ShopName => "shop_name",
            Field::ShopUrl => "shop_url",
            Field::ShopDescription => "shop_description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Nama Lengkap",
            Field::Email => "Email",
            Field::Password => "Kata Sandi",
            Field::PhoneNumber => "Nomor Telepon",
            Field::Address => "Alamat",
            Field::City => "Kota",
            Field::Province => "Provinsi",
            Field::PostalCode => "Kode Pos",
            Field::ShopName => "Nama Toko",
            Field::ShopUrl => "URL Toko",
            Field::ShopDescription => "Deskripsi Toko",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Email => FieldKind::Email,
            Field::Password => FieldKind::Password,
            Field::PhoneNumber => FieldKind::Tel,
            Field::ShopUrl => FieldKind::Url,
            Field::ShopDescription => FieldKind::TextArea,
            _ => FieldKind::Text,
        }
    }

    pub fn is_seller_only(self) -> bool {
        matches!(
            self,
            Field::ShopName | Field::ShopUrl | Field::ShopDescription
        )
    }

    /// Whether the field needs a value for a form of `role`.
    pub fn is_required(self, role: Role) -> bool {
        match self {
            Field::Name | Field::Email | Field::Password => true,
            Field::ShopName => role == Role::Seller,
            _ => false,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_form_extends_customer_form() {
        let customer = fields_for(Role::Customer);
        let seller = fields_for(Role::Seller);
        assert_eq!(&seller[..customer.len()], customer);
        assert!(seller[customer.len()..].iter().all(|f| f.is_seller_only()));
        assert!(!customer.iter().any(|f| f.is_seller_only()));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!(" customer ".parse::<Role>().unwrap(), Role::Customer);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Customer);
    }

    #[test]
    fn key_matches_serde_name() {
        for field in fields_for(Role::Seller) {
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn every_field_has_a_label_and_input_kind() {
        for field in fields_for(Role::Seller) {
            assert!(!field.label().is_empty(), "{field} has no label");
        }
        assert_eq!(Field::ShopName.label(), "Nama Toko");
        assert_eq!(Field::Email.kind(), FieldKind::Email);
        assert_eq!(Field::Password.kind(), FieldKind::Password);
        assert_eq!(Field::PhoneNumber.kind(), FieldKind::Tel);
        assert_eq!(Field::ShopUrl.kind(), FieldKind::Url);
        assert_eq!(Field::ShopDescription.kind(), FieldKind::TextArea);
        assert_eq!(Field::City.kind(), FieldKind::Text);
    }

    #[test]
    fn shop_name_required_only_for_sellers() {
        assert!(Field::ShopName.is_required(Role::Seller));
        assert!(!Field::ShopName.is_required(Role::Customer));
        assert!(!Field::PostalCode.is_required(Role::Seller));
    }
}
