//! Import batching over asynchronous image decodes.
//!
//! Decoding is the only asynchronous step in the system: each uploaded
//! file's decode completes (or fails) in its own callback, in no particular
//! order. A batch of files is committed to the layer store all at once,
//! after every file has settled, in completion order. The barrier counts
//! settled outcomes rather than successes, so one malformed file can never
//! wedge the rest of its batch.

use crate::layer::ImageHandle;
use thiserror::Error;

/// A successfully decoded image as reported by the decoder collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Handle to the decoded pixels, owned by the rendering collaborator.
    pub handle: ImageHandle,
    /// Source file name; becomes the layer name and the export `filename`.
    pub name: String,
    /// Natural (intrinsic) pixel width.
    pub width: f64,
    /// Natural pixel height.
    pub height: f64,
}

/// Why a file could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed image data: {0}")]
    Malformed(String),
}

/// Join barrier over one multi-file upload.
///
/// Feed each file's outcome through [`ImportBatch::resolve`]; the call that
/// settles the final file returns the accumulated successes, ready for
/// [`crate::store::LayerStore::add_layers`]. Failures are logged and
/// dropped without aborting sibling files.
#[derive(Debug)]
pub struct ImportBatch {
    expected: usize,
    settled: usize,
    decoded: Vec<DecodedImage>,
}

impl ImportBatch {
    /// Start a batch for `file_count` pending decodes.
    pub fn new(file_count: usize) -> Self {
        Self {
            expected: file_count,
            settled: 0,
            decoded: Vec::with_capacity(file_count),
        }
    }

    /// Record one decode outcome. Returns the full batch once every file
    /// has settled; `None` while decodes are still pending. Outcomes past
    /// the expected count are ignored.
    pub fn resolve(
        &mut self,
        outcome: Result<DecodedImage, DecodeError>,
    ) -> Option<Vec<DecodedImage>> {
        if self.settled >= self.expected {
            log::warn!("decode outcome after batch completion; ignored");
            return None;
        }
        self.settled += 1;
        match outcome {
            Ok(image) => self.decoded.push(image),
            Err(err) => log::warn!("dropping undecodable file: {err}"),
        }
        if self.settled == self.expected {
            Some(std::mem::take(&mut self.decoded))
        } else {
            None
        }
    }

    /// Number of files still pending.
    pub fn pending(&self) -> usize {
        self.expected - self.settled
    }

    pub fn is_complete(&self) -> bool {
        self.settled == self.expected
    }
}
