pub mod escape;
pub mod serde_ext;
