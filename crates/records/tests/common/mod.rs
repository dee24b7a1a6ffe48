pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{can_bind_localhost, student_json, test_config, truncated_body_server};
#[allow(unused_imports)]
pub use mocks::InstrumentedStore;
