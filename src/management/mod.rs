mod store;
mod token;

pub use store::CredentialStore;
pub use store::FileCredentialStore;
pub use store::MemoryCredentialStore;
pub use store::TOKEN_KEY;
pub use token::Token;
