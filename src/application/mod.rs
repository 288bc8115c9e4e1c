pub mod benchmark;
pub mod classify;
pub mod credits;
pub mod extract;
pub mod history;
pub mod normalize;
pub mod rank;
pub mod search;
