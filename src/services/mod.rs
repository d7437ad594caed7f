pub mod batch;
pub mod decoder;
pub mod naming;

pub use batch::{Batch, BatchSummary};
pub use decoder::{FrameDecoder, Runs};
pub use naming::output_path;
