pub mod batch;
pub mod config;
pub mod constants;
pub mod convert;
pub mod data;
pub mod decode;
pub mod derive;
pub mod explorer;
pub mod fleet;
pub mod fungible;
pub mod keys;
pub mod logging;
pub mod mint;
pub mod names;
pub mod submit;
pub mod transaction;
pub mod upload;
pub mod verify;
