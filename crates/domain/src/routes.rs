//! API route paths.

/// `POST` registers a new account.
pub const REGISTER: &str = "/api/auth/register";
/// `POST` exchanges credentials for a token.
pub const LOGIN: &str = "/api/auth/login";
/// Own entries; `{ENTRIES}/{id}` addresses one entry.
pub const ENTRIES: &str = "/api/entries";
/// Public entries, paginated.
pub const ENTRIES_PUBLIC: &str = "/api/entries/public";
/// Public entries of one author: `{ENTRIES_PUBLIC_USER}/{username}`.
pub const ENTRIES_PUBLIC_USER: &str = "/api/entries/public/user";
/// Entries from followed authors.
pub const ENTRIES_FEED: &str = "/api/entries/feed";
/// Full-text search over public entries.
pub const ENTRIES_PUBLIC_SEARCH: &str = "/api/entries/public/search";
/// Follow or unfollow: `{FOLLOW}/{username}`.
pub const FOLLOW: &str = "/api/follow";
/// Own followers.
pub const FOLLOW_ME_FOLLOWERS: &str = "/api/follow/me/followers";
/// Accounts the caller follows.
pub const FOLLOW_ME_FOLLOWING: &str = "/api/follow/me/following";
/// Pending incoming follow requests.
pub const FOLLOW_ME_REQUESTS: &str = "/api/follow/me/requests";
/// Approve a follow request: `{FOLLOW_APPROVE}/{username}`.
pub const FOLLOW_APPROVE: &str = "/api/follow/approve";
/// Reject a follow request: `{FOLLOW_REJECT}/{username}`.
pub const FOLLOW_REJECT: &str = "/api/follow/reject";
/// Notifications, paginated.
pub const NOTIFICATIONS: &str = "/api/notifications";
/// Number of unread notifications.
pub const NOTIFICATIONS_UNREAD_COUNT: &str = "/api/notifications/unread-count";
/// Marks every notification read.
pub const NOTIFICATIONS_READ_ALL: &str = "/api/notifications/read-all";
/// Own profile.
pub const PROFILE_ME: &str = "/api/profile/me";
/// Profile by username: `{PROFILE}/{username}`.
pub const PROFILE: &str = "/api/profile";
/// Profile search.
pub const PROFILE_SEARCH: &str = "/api/profile/search";
/// Suggested accounts to follow.
pub const USERS_SUGGESTED: &str = "/api/public/users/suggested";

/// Joins a route and a path segment with a single slash.
#[must_use]
pub fn join(route: &str, segment: &str) -> String {
    format!("{}/{}", route.trim_end_matches('/'), segment.trim_start_matches('/'))
}
