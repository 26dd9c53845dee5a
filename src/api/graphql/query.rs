use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::domain::models::{Album, Comment, Photo, Post, Todo, User};
use crate::infrastructure::upstream::{Resource, UpstreamClient};

pub struct QueryRoot;

/// Read-only root fields. Each resolver issues exactly one upstream call and
/// passes the response body through; collection order is whatever the
/// upstream returned.
#[Object]
impl QueryRoot {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Post>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let posts = upstream
            .list(Resource::Posts)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(posts))
    }

    async fn post(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Post>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let post = upstream
            .get(Resource::Posts, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(post))
    }

    async fn post_comments(&self, ctx: &Context<'_>, post_id: i64) -> Result<Option<Vec<Comment>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let comments = upstream
            .list_filtered(Resource::Comments, "postId", post_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comments))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let comments = upstream
            .list(Resource::Comments)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comments))
    }

    async fn comment(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Comment>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let comment = upstream
            .get(Resource::Comments, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comment))
    }

    async fn albums(&self, ctx: &Context<'_>) -> Result<Option<Vec<Album>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let albums = upstream
            .list(Resource::Albums)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(albums))
    }

    async fn album(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Album>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let album = upstream
            .get(Resource::Albums, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(album))
    }

    async fn album_photos(&self, ctx: &Context<'_>, album_id: i64) -> Result<Option<Vec<Photo>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let photos = upstream
            .list_filtered(Resource::Photos, "albumId", album_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photos))
    }

    async fn photos(&self, ctx: &Context<'_>) -> Result<Option<Vec<Photo>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let photos = upstream
            .list(Resource::Photos)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photos))
    }

    async fn photo(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Photo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let photo = upstream
            .get(Resource::Photos, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photo))
    }

    async fn todos(&self, ctx: &Context<'_>) -> Result<Option<Vec<Todo>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let todos = upstream
            .list(Resource::Todos)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todos))
    }

    async fn todo(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Todo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let todo = upstream
            .get(Resource::Todos, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todo))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let users = upstream
            .list(Resource::Users)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(users))
    }

    async fn user(&self, ctx: &Context<'_>, id: i64) -> Result<Option<User>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let user = upstream
            .get(Resource::Users, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(user))
    }

    async fn user_posts(&self, ctx: &Context<'_>, user_id: i64) -> Result<Option<Vec<Post>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let posts = upstream
            .list_filtered(Resource::Posts, "userId", user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(posts))
    }

    async fn user_albums(&self, ctx: &Context<'_>, user_id: i64) -> Result<Option<Vec<Album>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let albums = upstream
            .list_filtered(Resource::Albums, "userId", user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(albums))
    }

    async fn user_todos(&self, ctx: &Context<'_>, user_id: i64) -> Result<Option<Vec<Todo>>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let todos = upstream
            .list_filtered(Resource::Todos, "userId", user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todos))
    }
}
