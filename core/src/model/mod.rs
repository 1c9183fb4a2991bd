pub mod impact;
pub mod pool;
pub mod scenario;
