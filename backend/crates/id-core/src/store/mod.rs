pub mod store_error;
pub mod storer;
