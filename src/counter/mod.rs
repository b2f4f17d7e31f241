pub mod store;

pub use store::{CounterStore, RedisCounter, VIEW_COUNT_KEY};
