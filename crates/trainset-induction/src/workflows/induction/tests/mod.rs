mod common;

mod certificates;
mod properties;
mod service;
