pub mod credentials;

pub use credentials::EnvironmentCredential;
