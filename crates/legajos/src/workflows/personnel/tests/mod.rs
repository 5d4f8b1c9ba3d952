mod common;
mod registry;
mod service;
