//! User-facing strings. The storefront is Indonesian-only, so these are plain
//! constants rather than a translation table.

pub const SELLER_REGISTERED: &str = "Pendaftaran berhasil, selamat berjualan!";
pub const CUSTOMER_REGISTERED: &str = "Pendaftaran berhasil, selamat berbelanja!";

/// Shown when the registration service fails without a usable message.
pub const REGISTRATION_FAILED: &str =
    "Registrasi gagal, silakan periksa data Anda dan coba lagi.";

pub const FIELD_REQUIRED: &str = "Kolom ini wajib diisi";
pub const NAME_REQUIRED: &str = "Nama wajib diisi";
pub const EMAIL_REQUIRED: &str = "Email wajib diisi";
pub const EMAIL_INVALID: &str = "Format email tidak valid";
pub const PASSWORD_REQUIRED: &str = "Kata sandi wajib diisi";
pub const PASSWORD_TOO_SHORT: &str = "Kata sandi minimal 8 karakter";
pub const PHONE_INVALID: &str = "Nomor telepon harus 9-15 digit";
pub const POSTAL_CODE_INVALID: &str = "Kode pos harus 5 digit";
pub const SHOP_NAME_REQUIRED: &str = "Nama toko wajib diisi";
pub const SHOP_URL_INVALID: &str =
    "URL toko hanya boleh berisi huruf kecil, angka, dan tanda hubung";
pub const SHOP_DESCRIPTION_TOO_LONG: &str = "Deskripsi toko maksimal 500 karakter";

pub const EMAIL_TAKEN: &str = "Email already registered";
