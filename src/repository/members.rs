//! Member store

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
};

use super::IdSequence;

#[derive(Debug, Clone, Default)]
pub struct MembersRepository {
    members: IndexMap<i32, Member>,
    ids: IdSequence,
}

impl MembersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        member: CreateMember,
        registered_at: DateTime<Utc>,
    ) -> AppResult<&Member> {
        let id = self.ids.next_id()?;
        Ok(self
            .members
            .entry(id)
            .or_insert(Member::new(id, member, registered_at)))
    }

    /// Get member by ID
    pub fn get_by_id(&self, id: i32) -> AppResult<&Member> {
        self.members.get(&id).ok_or(AppError::NoSuchMember(id))
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> AppResult<&mut Member> {
        self.members.get_mut(&id).ok_or(AppError::NoSuchMember(id))
    }

    pub fn list(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Members holding at least one book
    pub fn count_borrowing(&self) -> usize {
        self.members
            .values()
            .filter(|member| !member.borrowed_books.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> CreateMember {
        CreateMember {
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            phone: None,
        }
    }

    #[test]
    fn test_sequential_ids() {
        let mut repo = MembersRepository::new();
        let now = Utc::now();
        assert_eq!(repo.create(create("Ada"), now).unwrap().id, 1);
        assert_eq!(repo.create(create("Grace"), now).unwrap().id, 2);

        let names: Vec<&str> = repo.list().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_get_unknown() {
        let repo = MembersRepository::new();
        assert_eq!(repo.get_by_id(1), Err(AppError::NoSuchMember(1)));
    }
}
