//! Panel paths and wire constants.

/// Login page and login submission.
pub const LOGIN_PATH: &str = "/auth/login";

/// Check-in action.
pub const CHECKIN_PATH: &str = "/user/checkin";

/// Authenticated dashboard.
pub const DASHBOARD_PATH: &str = "/user";

/// Path segment of the authenticated area; a login redirect containing it
/// means the credentials were accepted.
pub const AUTHENTICATED_SEGMENT: &str = "/user";

/// Substring of the server message when today's check-in is already done.
pub const ALREADY_CHECKED_IN_MARKER: &str = "已经签到";

/// Name of the anti-forgery input on the login form.
pub const CSRF_FIELD: &str = "_token";

/// Form field names of the login submission.
pub const EMAIL_FIELD: &str = "email";
/// See [`EMAIL_FIELD`].
pub const PASSWORD_FIELD: &str = "passwd";

/// Content type of form posts.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
