#![allow(dead_code, unused_imports)]

pub(crate) mod fake_pkl;
pub(crate) mod test_context;

pub(crate) use fake_pkl::FakePkl;
pub(crate) use test_context::TestContext;
