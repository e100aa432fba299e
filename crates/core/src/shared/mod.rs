pub mod constants;
pub mod video_metadata;

#[cfg(test)]
pub mod test_support;
