//! Soft delete lifecycle shared by every deletable entity.

use chrono::{DateTime, Utc};

/// Entities that are flagged instead of removed.
///
/// Implementors keep their activity flag and `deleted_at` timestamp in step:
/// an inactive record always carries the moment it was deleted.
pub trait SoftDelete {
    /// Whether the record shows up in default listings.
    fn is_active(&self) -> bool;

    /// Flag the record as deleted at `at`.
    fn mark_deleted(&mut self, at: DateTime<Utc>);

    /// Clear the delete marker.
    fn mark_restored(&mut self, at: DateTime<Utc>);

    /// Soft delete the record if it is active.
    ///
    /// Returns `false` (and leaves the record untouched) when it was already
    /// deleted.
    fn soft_delete(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.mark_deleted(at);
        true
    }

    /// Restore the record if it is deleted.
    ///
    /// Returns `false` (and leaves the record untouched) when it was already
    /// active.
    fn restore(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_active() {
            return false;
        }
        self.mark_restored(at);
        true
    }
}

/// Implements [`SoftDelete`] for entities with `is_active`, `deleted_at` and
/// `updated_at` fields.
macro_rules! impl_soft_delete_by_active_flag {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::soft_delete::SoftDelete for $ty {
                fn is_active(&self) -> bool {
                    self.is_active
                }

                fn mark_deleted(&mut self, at: ::chrono::DateTime<::chrono::Utc>) {
                    self.is_active = false;
                    self.deleted_at = Some(at);
                    self.updated_at = at;
                }

                fn mark_restored(&mut self, at: ::chrono::DateTime<::chrono::Utc>) {
                    self.is_active = true;
                    self.deleted_at = None;
                    self.updated_at = at;
                }
            }
        )+
    };
}

pub(crate) use impl_soft_delete_by_active_flag;
