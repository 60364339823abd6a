pub mod avatar;
pub mod transcode;
