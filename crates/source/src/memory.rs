use crate::ByteSource;
use crate::error::Result;
use async_trait::async_trait;

/// Content already held in memory, e.g. an upload or a test fixture.
pub struct MemorySource {
    data: Vec<u8>,
}
impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn origin(&self) -> String {
        format!("memory ({} bytes)", self.data.len())
    }
}
