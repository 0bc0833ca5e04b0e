pub mod checkout;
pub mod email_worker;
