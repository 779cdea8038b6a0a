//! Shared helpers for service tests against a mocked remote service.


pub(crate) use context::TestContext;
