//! Application services built on top of the router

mod card_generator;

pub use card_generator::CardGenerator;
