pub mod common;

mod config_loading;
mod oauth2_exchange;
