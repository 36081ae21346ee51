pub mod engine;
pub mod tracing;

pub use engine::{EngineCall, MockRequest, MockToolkit, RawHandle, Token};
pub use tracing::{CapturedEvent, init_test_tracing};
