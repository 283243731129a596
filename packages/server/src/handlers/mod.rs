pub mod advocate;
pub mod auth;
pub mod bid;
pub mod case;
pub mod consultation;
pub mod document;
pub mod legal_query;
