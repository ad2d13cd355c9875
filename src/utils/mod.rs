pub mod selector;

pub use selector::{FixedSelector, RandomSelector, WinnerSelector};
