//! Author entity.

/// A post author, identified by a unique email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub display_name: String,
    pub email: String,
}
