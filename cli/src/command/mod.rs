pub mod alias;
pub mod argument;
pub mod fmt;
pub mod logic;
pub mod new;
pub mod preview;
pub mod utils;
pub mod validate;
