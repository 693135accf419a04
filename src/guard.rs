use std::collections::HashMap;

use crate::auth::SessionStore;
use crate::models::Role;
use crate::permissions::{self, PermissionQuery};

/// Guard
///
/// Applies `authorize` at the UI boundary. A Guard borrows the live
/// SessionStore, so every decision reflects the session as of the call — a
/// guard constructed before a logout still fails closed afterwards.
///
/// These gates are advisory only: their job is to keep actions the backend
/// would reject off the interactive surface. The real authorization boundary
/// is the backend's own check on every REST call.
pub struct Guard<'a> {
    store: &'a SessionStore,
}

impl SessionStore {
    /// Entry point for guarded rendering against this store.
    pub fn guard(&self) -> Guard<'_> {
        Guard { store: self }
    }
}

impl<'a> Guard<'a> {
    /// The raw authorization decision for `query`.
    pub fn authorized(&self, query: &PermissionQuery) -> bool {
        let session = self.store.current_session();
        permissions::authorize(session.as_ref(), query)
    }

    /// render
    ///
    /// Yields `content` iff the query authorizes, else the provided fallback.
    pub fn render<T>(&self, query: &PermissionQuery, content: T, fallback: T) -> T {
        if self.authorized(query) { content } else { fallback }
    }

    /// Like `render`, with the type's default standing in for "nothing".
    pub fn render_or_default<T: Default>(&self, query: &PermissionQuery, content: T) -> T {
        self.render(query, content, T::default())
    }

    /// action
    ///
    /// A guarded action: `Some(action)` when authorized, `None` otherwise.
    /// Returning `None` (rather than a disabled flag) keeps the action absent
    /// from the interactive surface entirely.
    pub fn action<A>(&self, query: &PermissionQuery, action: A) -> Option<A> {
        if self.authorized(query) {
            Some(action)
        } else {
            None
        }
    }

    /// content_for_role
    ///
    /// Role-based content selection against the live session, including the
    /// display-fallback hierarchy. Not an access-control check.
    pub fn content_for_role<'c, T>(
        &self,
        content_by_role: &'c HashMap<Role, T>,
        fallback: &'c T,
    ) -> &'c T {
        let session = self.store.current_session();
        permissions::select_content(session.as_ref(), content_by_role, fallback)
    }
}
