
#[cfg_attr(not(feature = "acceptance-tests"), path = "test_context/local_mock.rs")]
#[cfg_attr(feature = "acceptance-tests", path = "test_context/sandbox.rs")]
pub mod test_context;
