pub mod open_er_api;

pub use open_er_api::OpenErApiProvider;
