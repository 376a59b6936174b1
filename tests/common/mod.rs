// Shared test support. Each integration test binary compiles this
// module separately, so not every helper is used by every binary.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock_identity;
