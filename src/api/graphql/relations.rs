//! Relationship fields on the entity types. Each resolver runs only when the
//! selection set asks for it, and issues one upstream call per parent object:
//! resolving N parents with a nested collection selected issues N further
//! calls. There is deliberately no request-scoped batching, deduplication, or
//! caching layer in front of these.

use async_graphql::{ComplexObject, Context, ErrorExtensions, Result};

use crate::domain::models::{Album, Comment, Photo, Post, Todo, User};
use crate::infrastructure::upstream::{Resource, UpstreamClient};

#[ComplexObject]
impl Post {
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let user = upstream
            .get(Resource::Users, user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(user))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let comments = upstream
            .list_filtered(Resource::Comments, "postId", id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comments))
    }
}

#[ComplexObject]
impl Comment {
    async fn post(&self, ctx: &Context<'_>) -> Result<Option<Post>> {
        let Some(post_id) = self.post_id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let post = upstream
            .get(Resource::Posts, post_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(post))
    }
}

#[ComplexObject]
impl Album {
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let user = upstream
            .get(Resource::Users, user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(user))
    }

    async fn photos(&self, ctx: &Context<'_>) -> Result<Option<Vec<Photo>>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let photos = upstream
            .list_filtered(Resource::Photos, "albumId", id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photos))
    }
}

#[ComplexObject]
impl Photo {
    async fn album(&self, ctx: &Context<'_>) -> Result<Option<Album>> {
        let Some(album_id) = self.album_id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let album = upstream
            .get(Resource::Albums, album_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(album))
    }
}

#[ComplexObject]
impl Todo {
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let user = upstream
            .get(Resource::Users, user_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(user))
    }
}

#[ComplexObject]
impl User {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Post>>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let posts = upstream
            .list_filtered(Resource::Posts, "userId", id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(posts))
    }

    async fn albums(&self, ctx: &Context<'_>) -> Result<Option<Vec<Album>>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let albums = upstream
            .list_filtered(Resource::Albums, "userId", id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(albums))
    }

    async fn todos(&self, ctx: &Context<'_>) -> Result<Option<Vec<Todo>>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let upstream = ctx.data::<UpstreamClient>()?;
        let todos = upstream
            .list_filtered(Resource::Todos, "userId", id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todos))
    }
}
