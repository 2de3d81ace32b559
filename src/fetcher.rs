//! External capability consulted when a client file is created
//!
//! The collaborator resolves the operating company's display name. The fold
//! never depends on the result; callers needing it capture it through their
//! own channel.

pub trait CompanyFetcher {
    fn company_name(&self) -> String;
}

/// Always-succeeding stand-in for tests and replay-only embeddings.
pub struct StubFetcher;

impl CompanyFetcher for StubFetcher {
    fn company_name(&self) -> String {
        "Acme".to_owned()
    }
}
