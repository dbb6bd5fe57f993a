mod credential_hash;
mod email;
mod name;
mod role;
