/// A named broadcast group. Members are display names in join order, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    members: Vec<String>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Room {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `false` when `name` was already a member.
    pub fn add_member(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.members.push(name.to_string());
        true
    }

    /// Returns `false` when `name` was not a member.
    pub fn remove_member(&mut self, name: &str) -> bool {
        match self.members.iter().position(|member| member == name) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}
