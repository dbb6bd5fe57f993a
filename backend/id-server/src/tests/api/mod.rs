mod deadline;
mod error;
mod login_request;
mod register_request;
