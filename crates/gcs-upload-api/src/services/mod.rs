pub mod multipart;
pub mod upload;

pub use multipart::spool_upload;
pub use upload::{UploadRequest, UploadService};
