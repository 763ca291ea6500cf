mod api_tests;
mod common;
mod config_tests;
