mod client;
mod session;

pub use client::AwsCodePipeline;
pub use session::load_sdk_config;
