// src/store.rs
//
// Entity store: sole id authority for users and items.
//
// Identifiers are dense integers assigned in creation order and never
// reused, so they double as indices into the backing vectors. Iteration
// is always in creation order; positions derived from it are reproducible
// for a fixed entity set.

use serde::{Deserialize, Serialize};

use crate::types::{Embedding, Item, ItemId, Timestep, User, UserId};

/// Owns all users and items for the life of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    users: Vec<User>,
    items: Vec<Item>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with the next unused id. No failure modes.
    pub fn create_user(&mut self, embedding: Embedding) -> UserId {
        let id = self.users.len();
        self.users.push(User { id, embedding });
        id
    }

    /// Create an item with the next unused id and an explicit availability
    /// horizon. No failure modes.
    pub fn create_item(&mut self, embedding: Embedding, use_until: f64) -> ItemId {
        let id = self.items.len();
        self.items.push(Item {
            id,
            embedding,
            use_until,
        });
        id
    }

    /// Create an item that never expires.
    pub fn create_item_permanent(&mut self, embedding: Embedding) -> ItemId {
        self.create_item(embedding, f64::INFINITY)
    }

    pub fn user(&self, id: UserId) -> &User {
        &self.users[id]
    }

    pub fn user_mut(&mut self, id: UserId) -> &mut User {
        &mut self.users[id]
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id]
    }

    /// All users, in creation order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All items, in creation order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Items available at time `t`, in creation order.
    pub fn available_items(&self, t: Timestep) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.is_available(t))
    }
}
