pub mod config;
pub mod logging;

pub mod dom;
pub mod extract;
pub mod fetch;
pub mod inspect;
pub mod overlay;
pub mod report;
pub mod resolve;
