//! Business logic services.
//!
//! - `auth` - User registration and login (argon2 password hashing)
//! - `qr` - QR code data URLs for public card links

pub mod auth;
pub mod qr;
