pub mod config;
pub mod consts;
pub mod error;
pub mod layout;
pub mod layouts;
pub mod optimizer;
pub mod scorer;
