pub mod rest;

pub use rest::{RestApi, NO_RESULTS_MESSAGE};
