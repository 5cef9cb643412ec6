//! Server-rendered HTML pages.
//!
//! Each page is a struct implementing [`Template`]; [`render`] wraps its body
//! in the shared layout and tags the response with the template name, both as
//! an `X-Template` header and as a [`TemplateName`] response extension.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use uuid::Uuid;

use quill_core::domain::{AuthoredPost, FieldError, Post};
use quill_shared::ErrorResponse;
use quill_shared::dto::PostForm;

use crate::middleware::auth::Identity;
use crate::routes::Route;

pub const TEMPLATE_HEADER: &str = "x-template";

/// Name of the template a response was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateName(pub &'static str);

pub trait Template {
    const NAME: &'static str;

    fn title(&self) -> String;

    /// Page content placed inside `<main>`.
    fn body(&self) -> String;
}

/// Render `page` inside the site layout.
pub fn render<T: Template>(status: StatusCode, viewer: Option<&Identity>, page: &T) -> HttpResponse {
    let html = layout(&page.title(), viewer, &page.body());

    let mut response = HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((TEMPLATE_HEADER, T::NAME))
        .body(html);
    response.extensions_mut().insert(TemplateName(T::NAME));
    response
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, viewer: Option<&Identity>, body: &str) -> String {
    let nav = match viewer {
        Some(identity) => format!(
            r#"<a href="{new}">New Post</a>
      <span>Logged in as {name}</span>
      <form method="post" action="{logout}"><button type="submit">Logout</button></form>"#,
            new = Route::PostCreate.path(),
            name = escape(&identity.username),
            logout = Route::Logout.path(),
        ),
        None => format!(r#"<a href="{}">Login</a>"#, Route::Login.path()),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Quill</title>
</head>
<body>
  <header>
    <nav>
      <a href="{home}">Quill</a>
      {nav}
    </nav>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
        home = Route::BlogHome.path(),
    )
}

fn post_date(post: &Post) -> String {
    post.created_at.format("%B %-d, %Y").to_string()
}

/// `blog/home.html` - every post, newest first.
pub struct HomePage<'a> {
    pub posts: &'a [AuthoredPost],
}

impl Template for HomePage<'_> {
    const NAME: &'static str = "blog/home.html";

    fn title(&self) -> String {
        "Home".to_string()
    }

    fn body(&self) -> String {
        if self.posts.is_empty() {
            return "    <p>No posts yet.</p>".to_string();
        }

        self.posts
            .iter()
            .map(|entry| {
                format!(
                    r#"    <article>
      <p><small>{author} &middot; {date}</small></p>
      <h2><a href="{url}">{title}</a></h2>
      <p>{content}</p>
    </article>"#,
                    author = escape(&entry.author_username),
                    date = post_date(&entry.post),
                    url = entry.post.absolute_url(),
                    title = escape(&entry.post.title),
                    content = escape(&entry.post.content),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `blog/post_detail.html` - one post; the author also gets edit links.
pub struct PostDetailPage<'a> {
    pub entry: &'a AuthoredPost,
    pub viewer_id: Option<Uuid>,
}

impl Template for PostDetailPage<'_> {
    const NAME: &'static str = "blog/post_detail.html";

    fn title(&self) -> String {
        self.entry.post.to_string()
    }

    fn body(&self) -> String {
        let post = &self.entry.post;
        let actions = match self.viewer_id {
            Some(id) if post.is_authored_by(id) => format!(
                r#"
      <p><a href="{update}">Update</a> <a href="{delete}">Delete</a></p>"#,
                update = Route::PostUpdate(post.id).path(),
                delete = Route::PostDelete(post.id).path(),
            ),
            _ => String::new(),
        };

        format!(
            r#"    <article>
      <p><small>{author} &middot; {date}</small></p>{actions}
      <h2>{title}</h2>
      <p>{content}</p>
    </article>"#,
            author = escape(&self.entry.author_username),
            date = post_date(post),
            title = escape(&post.title),
            content = escape(&post.content),
        )
    }
}

/// `blog/post_form.html` - shared by the create and update views.
pub struct PostFormPage<'a> {
    pub heading: &'a str,
    pub action: String,
    pub form: &'a PostForm,
    pub errors: &'a [FieldError],
}

impl PostFormPage<'_> {
    fn errors_for(&self, field: &str) -> String {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!(r#"<li class="error">{}</li>"#, escape(&e.message)))
            .collect::<Vec<_>>()
            .join("")
    }
}

impl Template for PostFormPage<'_> {
    const NAME: &'static str = "blog/post_form.html";

    fn title(&self) -> String {
        self.heading.to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"    <h1>{heading}</h1>
    <form method="post" action="{action}">
      <label for="id_title">Title</label>
      <ul>{title_errors}</ul>
      <input type="text" id="id_title" name="title" maxlength="{max}" value="{title}" required>
      <label for="id_content">Content</label>
      <ul>{content_errors}</ul>
      <textarea id="id_content" name="content" required>{content}</textarea>
      <button type="submit">Post</button>
    </form>"#,
            heading = escape(self.heading),
            action = escape(&self.action),
            title_errors = self.errors_for("title"),
            max = quill_core::domain::TITLE_MAX_CHARS,
            title = escape(&self.form.title),
            content_errors = self.errors_for("content"),
            content = escape(&self.form.content),
        )
    }
}

/// `blog/post_confirm_delete.html`
pub struct PostConfirmDeletePage<'a> {
    pub post: &'a Post,
}

impl Template for PostConfirmDeletePage<'_> {
    const NAME: &'static str = "blog/post_confirm_delete.html";

    fn title(&self) -> String {
        "Delete Post".to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"    <h1>Delete Post</h1>
    <form method="post" action="{action}">
      <p>Are you sure you want to delete the post "{title}"?</p>
      <button type="submit">Yes, Delete</button>
      <a href="{cancel}">Cancel</a>
    </form>"#,
            action = Route::PostDelete(self.post.id).path(),
            title = escape(&self.post.title),
            cancel = self.post.absolute_url(),
        )
    }
}

/// `auth/login.html`
pub struct LoginPage<'a> {
    pub username: &'a str,
    pub next: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl Template for LoginPage<'_> {
    const NAME: &'static str = "auth/login.html";

    fn title(&self) -> String {
        "Login".to_string()
    }

    fn body(&self) -> String {
        let error = self
            .error
            .map(|e| format!(r#"
      <p class="error">{}</p>"#, escape(e)))
            .unwrap_or_default();
        let next = self
            .next
            .map(|n| format!(r#"
      <input type="hidden" name="next" value="{}">"#, escape(n)))
            .unwrap_or_default();

        format!(
            r#"    <h1>Log In</h1>
    <form method="post" action="{action}">{error}{next}
      <label for="id_username">Username</label>
      <input type="text" id="id_username" name="username" value="{username}" required>
      <label for="id_password">Password</label>
      <input type="password" id="id_password" name="password" required>
      <button type="submit">Login</button>
    </form>"#,
            action = Route::Login.path(),
            username = escape(self.username),
        )
    }
}

/// `error.html` - problem details for a failed request.
pub struct ErrorPage<'a> {
    pub problem: &'a ErrorResponse,
}

impl Template for ErrorPage<'_> {
    const NAME: &'static str = "error.html";

    fn title(&self) -> String {
        self.problem.title.clone()
    }

    fn body(&self) -> String {
        let detail = self
            .problem
            .detail
            .as_deref()
            .map(|d| format!("\n    <p>{}</p>", escape(d)))
            .unwrap_or_default();

        format!(
            r#"    <h1>{status} {title}</h1>{detail}
    <p><a href="{home}">Back to all posts</a></p>"#,
            status = self.problem.status,
            title = escape(&self.problem.title),
            home = Route::BlogHome.path(),
        )
    }
}

/// Render problem details with their own status code.
pub fn render_error(problem: &ErrorResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    render(status, None, &ErrorPage { problem })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn home_lists_escaped_posts() {
        let post = Post::new(Uuid::new_v4(), "Fish & Chips", "<b>tasty</b>");
        let posts = [AuthoredPost {
            post: post.clone(),
            author_username: "testuser".to_string(),
        }];

        let body = HomePage { posts: &posts }.body();

        assert!(body.contains("Fish &amp; Chips"));
        assert!(body.contains("&lt;b&gt;tasty&lt;/b&gt;"));
        assert!(body.contains(&post.absolute_url()));
        assert!(body.contains("testuser"));
    }

    #[test]
    fn home_without_posts_is_not_an_error() {
        assert!(HomePage { posts: &[] }.body().contains("No posts yet."));
    }

    #[test]
    fn detail_shows_edit_links_to_author_only() {
        let entry = AuthoredPost {
            post: Post::new(Uuid::new_v4(), "Test Post", "body"),
            author_username: "testuser".to_string(),
        };
        let update = Route::PostUpdate(entry.post.id).path();

        let as_author = PostDetailPage {
            entry: &entry,
            viewer_id: Some(entry.post.author_id),
        };
        let as_stranger = PostDetailPage {
            entry: &entry,
            viewer_id: Some(Uuid::new_v4()),
        };

        assert!(as_author.body().contains(&update));
        assert!(!as_stranger.body().contains(&update));
    }

    #[test]
    fn render_tags_response_with_template() {
        let response = render(StatusCode::OK, None, &HomePage { posts: &[] });

        assert_eq!(
            response.headers().get(TEMPLATE_HEADER).unwrap(),
            "blog/home.html"
        );
        assert_eq!(
            response.extensions().get::<TemplateName>(),
            Some(&TemplateName("blog/home.html"))
        );
    }
}
