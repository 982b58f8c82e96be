//! Dummy backend that always suggests the same subject.

use super::SubjectBackend;
use crate::subject::Hit;

pub const DUMMY_URI: &str = "http://example.org/dummy";
pub const DUMMY_LABEL: &str = "dummy";

#[derive(Debug, Default)]
pub struct DummyBackend;

impl SubjectBackend for DummyBackend {
    fn name(&self) -> &str {
        "dummy"
    }

    fn suggest(&self, _text: &str) -> Vec<Hit> {
        vec![Hit::new(DUMMY_URI, DUMMY_LABEL, 1.0)]
    }
}
