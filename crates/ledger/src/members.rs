use uuid::Uuid;

/// A member of a mess group.
///
/// The id is opaque and unique within a group. Historical events keep
/// referencing it even if the member later leaves, so deletion never rewrites
/// past records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
