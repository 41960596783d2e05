//! Application services implementing business logic.

pub mod link_service;

pub use link_service::LinkService;
