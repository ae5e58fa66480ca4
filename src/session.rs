//! The caller-owned "current sequence" slot.
//!
//! A front end keeps one [`Session`] for as long as it runs and passes it
//! around explicitly. Loading replaces the whole value; a failed load leaves
//! the previous sequence untouched.
use crate::classify::{classify_with, ClassifyOptions};
use crate::error::Result;
use crate::seq::Sequence;
use crate::transcribe::transcribe;

#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Sequence>,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> Option<&Sequence> { self.current.as_ref() }

    /// Classify `raw` and, on success, make it the current sequence.
    pub fn load(&mut self, raw: &str, opts: &ClassifyOptions) -> Result<&Sequence> {
        let seq = classify_with(raw, opts)?;
        Ok(self.current.insert(seq))
    }

    /// Transcribe the current sequence, if any. The session itself is unchanged.
    pub fn transcribe_current(&self) -> Option<Result<Sequence>> {
        self.current.as_ref().map(transcribe)
    }

    pub fn clear(&mut self) { self.current = None; }
}
