use bytes::Bytes;

/// Largest accepted upload, in bytes (50 MiB).
pub const MAX_UPLOAD_BYTES: usize = 52_428_800;

#[derive(Debug, Clone)]
pub struct UploadMediaInput {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}
