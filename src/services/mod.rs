pub mod advocate_service;

pub use advocate_service::AdvocateService;
