//! Route paths.

pub const GET_PING: &str = "/ping";
pub const GET_WHOAMI: &str = "/whoami";

pub const POST_ADMIN_GET_JWT: &str = "/admin/getJwt";
pub const POST_ADMIN_SIGNUP: &str = "/admin/signup";
pub const GET_ADMIN_VALIDATE: &str = "/admin/validate";

pub const POST_USERS_AUTH: &str = "/users/auth";
pub const POST_USERS_REGISTER: &str = "/users/register";
pub const DELETE_USERS_DELETE: &str = "/users/delete";
pub const POST_USERS_EDIT_UUID: &str = "/users/edit_uuid";
pub const GET_USERS_GET_ALL: &str = "/users/get_all";

pub const POST_NEWS_ADD: &str = "/news/add";
pub const DELETE_NEWS_DELETE: &str = "/news/delete";
pub const GET_NEWS_GET: &str = "/news/get";
pub const POST_NEWS_EDIT: &str = "/news/edit";
