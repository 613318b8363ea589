pub mod confirmations;
pub mod health;
pub mod upload_form;
