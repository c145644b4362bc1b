pub mod mock;
pub mod noop;
pub mod production;
