use serde::{Deserialize, Serialize};

use super::fields::Role;

/// Fields shared by every account type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFields {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
}

/// Seller-only fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopFields {
    pub shop_name: String,
    #[serde(default)]
    pub shop_url: String,
    #[serde(default)]
    pub shop_description: String,
}

/// Normalized registration payload handed to the registration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RegisterRequest", from = "RegisterRequest")]
pub enum RegistrationPayload {
    Customer(AccountFields),
    Seller {
        account: AccountFields,
        shop: ShopFields,
    },
}

impl RegistrationPayload {
    pub fn role(&self) -> Role {
        match self {
            RegistrationPayload::Customer(_) => Role::Customer,
            RegistrationPayload::Seller { .. } => Role::Seller,
        }
    }

    pub fn account(&self) -> &AccountFields {
        match self {
            RegistrationPayload::Customer(account) => account,
            RegistrationPayload::Seller { account, .. } => account,
        }
    }

    pub fn shop(&self) -> Option<&ShopFields> {
        match self {
            RegistrationPayload::Customer(_) => None,
            RegistrationPayload::Seller { shop, .. } => Some(shop),
        }
    }
}

/// Flat JSON body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(flatten)]
    pub account: AccountFields,
    pub role: Role,
    #[serde(flatten)]
    pub shop: Option<ShopFields>,
}

impl From<RegistrationPayload> for RegisterRequest {
    fn from(payload: RegistrationPayload) -> Self {
        match payload {
            RegistrationPayload::Customer(account) => RegisterRequest {
                account,
                role: Role::Customer,
                shop: None,
            },
            RegistrationPayload::Seller { account, shop } => RegisterRequest {
                account,
                role: Role::Seller,
                shop: Some(shop),
            },
        }
    }
}

impl From<RegisterRequest> for RegistrationPayload {
    fn from(req: RegisterRequest) -> Self {
        match req.role {
            // Shop keys sent alongside a customer role are dropped.
            Role::Customer => RegistrationPayload::Customer(req.account),
            Role::Seller => RegistrationPayload::Seller {
                account: req.account,
                shop: req.shop.unwrap_or_default(),
            },
        }
    }
}
