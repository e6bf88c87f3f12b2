//! Extension points of the entity pipeline.

use super::Entity;

/// Trait for filtering individual entities before they are merged
pub trait EntityValidator: Send + Sync + std::fmt::Debug {
    /// Whether the entity should be kept
    fn validate(&self, entity: &Entity, text: &str) -> bool;

    /// Get validator name
    fn name(&self) -> &str;
}

/// Trait for post-processing the entity list of one document
pub trait EntityPostProcessor: Send + Sync + std::fmt::Debug {
    /// Process entities and return the modified list
    fn process(&self, entities: Vec<Entity>) -> Vec<Entity>;

    /// Get post-processor name
    fn name(&self) -> &str;
}
