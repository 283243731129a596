pub mod advocate;
pub mod bid;
pub mod case;
pub mod document;
pub mod legal_query;
pub mod notification;
pub mod user;
