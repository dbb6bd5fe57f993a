pub mod handlers;
pub mod login_request;
pub mod register_request;
pub mod token_response;
