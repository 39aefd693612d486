// Role-based access control primitives
//
// A role carries an ordered list of (resource, action) permissions. A check
// is a linear scan of that list: a stored permission grants the request when
// its resource matches and its action is either the requested action or the
// MANAGE wildcard. The list is small per role, so no caching or indexing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity types subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Resource {
    Product,
    Blog,
    Announcement,
    News,
    Contact,
    User,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Product => "PRODUCT",
            Resource::Blog => "BLOG",
            Resource::Announcement => "ANNOUNCEMENT",
            Resource::News => "NEWS",
            Resource::Contact => "CONTACT",
            Resource::User => "USER",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operations on a resource
/// MANAGE is a wildcard implying every other action on its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::Manage => "MANAGE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single (resource, action) grant belonging to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

/// Checks whether a permission list grants the requested (resource, action)
///
/// Linear scan: a stored permission matches when its resource equals the
/// requested resource and its action equals the requested action or MANAGE.
pub fn has_permission(permissions: &[Permission], resource: Resource, action: Action) -> bool {
    permissions.iter().any(|granted| {
        granted.resource == resource
            && (granted.action == action || granted.action == Action::Manage)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grant(resource: Resource, action: Action) -> Permission {
        Permission { resource, action }
    }

    #[test]
    fn test_exact_match_grants() {
        let perms = vec![grant(Resource::Blog, Action::Update)];
        assert!(has_permission(&perms, Resource::Blog, Action::Update));
    }

    #[test]
    fn test_manage_implies_all_actions_on_resource() {
        let perms = vec![grant(Resource::Product, Action::Manage)];

        assert!(has_permission(&perms, Resource::Product, Action::Create));
        assert!(has_permission(&perms, Resource::Product, Action::Read));
        assert!(has_permission(&perms, Resource::Product, Action::Update));
        assert!(has_permission(&perms, Resource::Product, Action::Delete));
        assert!(has_permission(&perms, Resource::Product, Action::Manage));
    }

    #[test]
    fn test_manage_does_not_cross_resources() {
        // (PRODUCT, MANAGE) grants (PRODUCT, DELETE) but not (USER, DELETE)
        let perms = vec![grant(Resource::Product, Action::Manage)];

        assert!(has_permission(&perms, Resource::Product, Action::Delete));
        assert!(!has_permission(&perms, Resource::User, Action::Delete));
    }

    #[test]
    fn test_action_mismatch_denies() {
        let perms = vec![grant(Resource::Blog, Action::Read)];

        assert!(!has_permission(&perms, Resource::Blog, Action::Delete));
        assert!(!has_permission(&perms, Resource::Blog, Action::Manage));
    }

    #[test]
    fn test_empty_list_denies_everything() {
        assert!(!has_permission(&[], Resource::Contact, Action::Read));
    }

    #[test]
    fn test_scan_finds_match_anywhere_in_list() {
        let perms = vec![
            grant(Resource::Blog, Action::Read),
            grant(Resource::News, Action::Manage),
            grant(Resource::Contact, Action::Delete),
        ];

        assert!(has_permission(&perms, Resource::Contact, Action::Delete));
        assert!(has_permission(&perms, Resource::News, Action::Update));
        assert!(!has_permission(&perms, Resource::Product, Action::Read));
    }

    #[test]
    fn test_serde_uppercase_wire_format() {
        let perm = grant(Resource::Announcement, Action::Manage);
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, r#"{"resource":"ANNOUNCEMENT","action":"MANAGE"}"#);

        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, perm);
    }

    fn any_resource() -> impl Strategy<Value = Resource> {
        prop_oneof![
            Just(Resource::Product),
            Just(Resource::Blog),
            Just(Resource::Announcement),
            Just(Resource::News),
            Just(Resource::Contact),
            Just(Resource::User),
        ]
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Create),
            Just(Action::Read),
            Just(Action::Update),
            Just(Action::Delete),
            Just(Action::Manage),
        ]
    }

    proptest! {
        // MANAGE on a resource grants every action on that resource
        #[test]
        fn prop_manage_is_wildcard(resource in any_resource(), action in any_action()) {
            let perms = vec![grant(resource, Action::Manage)];
            prop_assert!(has_permission(&perms, resource, action));
        }

        // A grant never authorizes a different resource
        #[test]
        fn prop_no_cross_resource_grants(
            granted_resource in any_resource(),
            granted_action in any_action(),
            requested_resource in any_resource(),
            requested_action in any_action(),
        ) {
            prop_assume!(granted_resource != requested_resource);
            let perms = vec![grant(granted_resource, granted_action)];
            prop_assert!(!has_permission(&perms, requested_resource, requested_action));
        }
    }
}
