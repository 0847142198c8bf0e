pub mod auth;
pub mod completions;
pub mod configure;

pub use auth::AuthCommand;
pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
