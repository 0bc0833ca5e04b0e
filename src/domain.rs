pub mod address;
pub mod checkout;
pub mod email;
pub mod error;
pub mod id;
pub mod orders;
pub mod pii;
pub mod signature;
