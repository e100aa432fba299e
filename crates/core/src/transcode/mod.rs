pub mod options;
pub mod pipeline;
pub mod transcode_use_case;
