pub use risk::*;
pub use selector::*;

mod risk;
mod selector;
