//! Named routes and their URL patterns.
//!
//! Every resource is registered with actix under [`Route::name`], so
//! `HttpRequest::url_for` and [`Route::path`] agree on the same URL.

use uuid::Uuid;

pub const BLOG_HOME: &str = "blog-home";
pub const POST_DETAIL: &str = "post-detail";
pub const POST_CREATE: &str = "post-create";
pub const POST_UPDATE: &str = "post-update";
pub const POST_DELETE: &str = "post-delete";
pub const LOGIN: &str = "login";
pub const LOGOUT: &str = "logout";
pub const HEALTH: &str = "health";

/// A resolvable route, with its path arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    BlogHome,
    PostDetail(Uuid),
    PostCreate,
    PostUpdate(Uuid),
    PostDelete(Uuid),
    Login,
    Logout,
    Health,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::BlogHome => BLOG_HOME,
            Route::PostDetail(_) => POST_DETAIL,
            Route::PostCreate => POST_CREATE,
            Route::PostUpdate(_) => POST_UPDATE,
            Route::PostDelete(_) => POST_DELETE,
            Route::Login => LOGIN,
            Route::Logout => LOGOUT,
            Route::Health => HEALTH,
        }
    }

    /// actix resource pattern for this route.
    pub fn pattern(&self) -> &'static str {
        match self {
            Route::BlogHome => "/",
            Route::PostDetail(_) => "/post/{id}",
            Route::PostCreate => "/post/new",
            Route::PostUpdate(_) => "/post/{id}/update",
            Route::PostDelete(_) => "/post/{id}/delete",
            Route::Login => "/login",
            Route::Logout => "/logout",
            Route::Health => "/health",
        }
    }

    /// Concrete path with arguments filled in.
    pub fn path(&self) -> String {
        match self {
            Route::PostDetail(id) | Route::PostUpdate(id) | Route::PostDelete(id) => {
                self.pattern().replace("{id}", &id.to_string())
            }
            _ => self.pattern().to_string(),
        }
    }
}

/// Reverse a route by name. Unknown names, or a missing id for a route
/// that needs one, yield `None`.
#[cfg(test)]
pub fn url_for(name: &str, id: Option<Uuid>) -> Option<String> {
    let route = match (name, id) {
        (BLOG_HOME, _) => Route::BlogHome,
        (POST_DETAIL, Some(id)) => Route::PostDetail(id),
        (POST_CREATE, _) => Route::PostCreate,
        (POST_UPDATE, Some(id)) => Route::PostUpdate(id),
        (POST_DELETE, Some(id)) => Route::PostDelete(id),
        (LOGIN, _) => Route::Login,
        (LOGOUT, _) => Route::Logout,
        (HEALTH, _) => Route::Health,
        _ => return None,
    };
    Some(route.path())
}
