pub mod api_errors;
pub mod resend;
pub mod stripe;
