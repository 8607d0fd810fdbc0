mod definition_handler;

pub use definition_handler::*;
