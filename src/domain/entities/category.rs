//! Category entity.

/// A post category. Only active categories are listed publicly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

/// Input data for creating a category.
///
/// When `slug` is `None` it is derived from `name`.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: Option<String>,
    pub is_active: bool,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_defaults() {
        let new = NewCategory::named("Rust");
        assert_eq!(new.name, "Rust");
        assert!(new.slug.is_none());
        assert!(new.is_active);
    }
}
