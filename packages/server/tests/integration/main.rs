mod common;

mod advocate;
mod auth;
mod bid;
mod consultation;
mod document;
mod legal_query;
