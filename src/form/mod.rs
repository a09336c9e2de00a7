mod dto;
mod fields;
mod input;

pub use dto::{AccountFields, RegisterRequest, RegistrationPayload, ShopFields};
pub use fields::{fields_for, Field, FieldKind, Role, UnknownRole};
pub use input::{initialize, RegistrationInput};

/// Where the form sends the user after a successful registration.
pub const SIGN_IN_PATH: &str = "/sign-in";
