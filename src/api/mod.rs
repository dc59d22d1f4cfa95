mod goldfish_client;

pub use goldfish_client::GoldfishClient;
