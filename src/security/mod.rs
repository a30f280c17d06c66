pub mod authenticator;
pub mod inactivity;
pub mod pin;
