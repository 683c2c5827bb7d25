use crate::ids::ServiceId;

/// Services ticked in the picker, in the order they were ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    ids: Vec<ServiceId>,
}

impl ServiceSelection {
    /// Adds or removes `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ServiceId) -> bool {
        match self.ids.iter().position(|selected| selected == &id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn contains(&self, id: &ServiceId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[ServiceId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
