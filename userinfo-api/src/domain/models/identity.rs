use std::fmt;

/// The calling application behind an `x-application-id` token.
#[derive(Clone, PartialEq, Eq)]
pub struct ApplicationIdentity {
    pub id: String,
    pub name: String,
}

impl ApplicationIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Both id and name resolved to non-blank values.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

// Ids double as bearer tokens, keep them out of logs.
impl fmt::Debug for ApplicationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationIdentity")
            .field("id", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}
