//! Blog post views: list, detail, create, update and delete.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Post, validate_post_fields};
use quill_shared::dto::PostForm;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::routes::Route;
use crate::state::AppState;
use crate::templates::{
    HomePage, PostConfirmDeletePage, PostDetailPage, PostFormPage, render,
};

/// 302 to a named route.
pub(crate) fn redirect(route: Route) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, route.path()))
        .finish()
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// Load a post the current user is allowed to change.
async fn authored_post(state: &AppState, identity: &Identity, id: Uuid) -> AppResult<Post> {
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    post.ensure_author(identity.user_id)?;
    Ok(post)
}

fn form_page(
    identity: &Identity,
    heading: &str,
    route: Route,
    form: &PostForm,
    errors: &[quill_core::domain::FieldError],
) -> HttpResponse {
    render(
        StatusCode::OK,
        Some(identity),
        &PostFormPage {
            heading,
            action: route.path(),
            form,
            errors,
        },
    )
}

/// GET / - every post, newest first.
pub async fn list(state: web::Data<AppState>, viewer: OptionalIdentity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_newest_first().await?;

    Ok(render(
        StatusCode::OK,
        viewer.identity(),
        &HomePage { posts: &posts },
    ))
}

/// GET /post/{id}
pub async fn detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let entry = state
        .posts
        .find_authored(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(render(
        StatusCode::OK,
        viewer.identity(),
        &PostDetailPage {
            entry: &entry,
            viewer_id: viewer.user_id(),
        },
    ))
}

/// GET /post/new
pub async fn create_form(identity: Identity) -> HttpResponse {
    form_page(
        &identity,
        "New Post",
        Route::PostCreate,
        &PostForm::default(),
        &[],
    )
}

/// POST /post/new
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let (title, content) = (form.title.trim(), form.content.trim());

    let errors = validate_post_fields(title, content);
    if !errors.is_empty() {
        return Ok(form_page(
            &identity,
            "New Post",
            Route::PostCreate,
            &form,
            &errors,
        ));
    }

    let post = state
        .posts
        .save(Post::new(identity.user_id, title, content))
        .await?;
    tracing::info!(post_id = %post.id, author = %identity.username, "Post created");

    Ok(redirect(Route::BlogHome))
}

/// GET /post/{id}/update
pub async fn update_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = authored_post(&state, &identity, path.into_inner()).await?;
    let form = PostForm {
        title: post.title.clone(),
        content: post.content.clone(),
    };

    Ok(form_page(
        &identity,
        "Update Post",
        Route::PostUpdate(post.id),
        &form,
        &[],
    ))
}

/// POST /post/{id}/update - title and content only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = authored_post(&state, &identity, path.into_inner()).await?;
    let form = form.into_inner();
    let (title, content) = (form.title.trim(), form.content.trim());

    let errors = validate_post_fields(title, content);
    if !errors.is_empty() {
        return Ok(form_page(
            &identity,
            "Update Post",
            Route::PostUpdate(post.id),
            &form,
            &errors,
        ));
    }

    post.revise(title, content);
    let post = state.posts.save(post).await?;
    tracing::info!(post_id = %post.id, "Post updated");

    Ok(redirect(Route::BlogHome))
}

/// GET /post/{id}/delete - confirmation prompt.
pub async fn delete_confirm(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = authored_post(&state, &identity, path.into_inner()).await?;

    Ok(render(
        StatusCode::OK,
        Some(&identity),
        &PostConfirmDeletePage { post: &post },
    ))
}

/// POST /post/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = authored_post(&state, &identity, path.into_inner()).await?;

    state.posts.delete(post.id).await?;
    tracing::info!(post_id = %post.id, author = %identity.username, "Post deleted");

    Ok(redirect(Route::BlogHome))
}
