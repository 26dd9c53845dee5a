use async_graphql::{Context, ErrorExtensions, Object, Result};
use serde::Serialize;

use crate::domain::models::{Album, Comment, Photo, Post, Todo};
use crate::infrastructure::upstream::{Resource, UpstreamClient};

pub struct MutationRoot;

/// Write root fields for the five writable entities. Creates require every
/// argument, enforced by GraphQL validation before the resolver runs; edits
/// take a required id plus optional fields and send only the supplied fields
/// as the PATCH body, with the id kept out of the payload; deletes pass the
/// upstream body through.
#[Object]
impl MutationRoot {
    async fn add_post(
        &self,
        ctx: &Context<'_>,
        user_id: i64,
        title: String,
        body: String,
    ) -> Result<Option<Post>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let draft = PostDraft {
            user_id,
            title,
            body,
        };
        let post = upstream
            .create(Resource::Posts, &draft)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(post))
    }

    async fn edit_post(
        &self,
        ctx: &Context<'_>,
        id: i64,
        user_id: Option<i64>,
        title: Option<String>,
        body: Option<String>,
    ) -> Result<Option<Post>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let patch = PostPatch {
            user_id,
            title,
            body,
        };
        let post = upstream
            .update(Resource::Posts, id, &patch)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(post))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Post>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let post = upstream
            .delete(Resource::Posts, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(post))
    }

    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        post_id: i64,
        name: String,
        email: String,
        body: String,
    ) -> Result<Option<Comment>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let draft = CommentDraft {
            post_id,
            name,
            email,
            body,
        };
        let comment = upstream
            .create(Resource::Comments, &draft)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comment))
    }

    async fn edit_comment(
        &self,
        ctx: &Context<'_>,
        id: i64,
        post_id: Option<i64>,
        name: Option<String>,
        email: Option<String>,
        body: Option<String>,
    ) -> Result<Option<Comment>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let patch = CommentPatch {
            post_id,
            name,
            email,
            body,
        };
        let comment = upstream
            .update(Resource::Comments, id, &patch)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comment))
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Comment>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let comment = upstream
            .delete(Resource::Comments, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(comment))
    }

    async fn add_album(
        &self,
        ctx: &Context<'_>,
        user_id: i64,
        title: String,
    ) -> Result<Option<Album>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let draft = AlbumDraft { user_id, title };
        let album = upstream
            .create(Resource::Albums, &draft)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(album))
    }

    async fn edit_album(
        &self,
        ctx: &Context<'_>,
        id: i64,
        user_id: Option<i64>,
        title: Option<String>,
    ) -> Result<Option<Album>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let patch = AlbumPatch { user_id, title };
        let album = upstream
            .update(Resource::Albums, id, &patch)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(album))
    }

    async fn delete_album(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Album>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let album = upstream
            .delete(Resource::Albums, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(album))
    }

    async fn add_photo(
        &self,
        ctx: &Context<'_>,
        album_id: i64,
        title: String,
        url: String,
        thumbnail_url: String,
    ) -> Result<Option<Photo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let draft = PhotoDraft {
            album_id,
            title,
            url,
            thumbnail_url,
        };
        let photo = upstream
            .create(Resource::Photos, &draft)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photo))
    }

    async fn edit_photo(
        &self,
        ctx: &Context<'_>,
        id: i64,
        album_id: Option<i64>,
        title: Option<String>,
        url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<Option<Photo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let patch = PhotoPatch {
            album_id,
            title,
            url,
            thumbnail_url,
        };
        let photo = upstream
            .update(Resource::Photos, id, &patch)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photo))
    }

    async fn delete_photo(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Photo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let photo = upstream
            .delete(Resource::Photos, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(photo))
    }

    async fn add_todo(
        &self,
        ctx: &Context<'_>,
        user_id: i64,
        title: String,
        completed: bool,
    ) -> Result<Option<Todo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let draft = TodoDraft {
            user_id,
            title,
            completed,
        };
        let todo = upstream
            .create(Resource::Todos, &draft)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todo))
    }

    async fn edit_todo(
        &self,
        ctx: &Context<'_>,
        id: i64,
        user_id: Option<i64>,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Option<Todo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let patch = TodoPatch {
            user_id,
            title,
            completed,
        };
        let todo = upstream
            .update(Resource::Todos, id, &patch)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todo))
    }

    async fn delete_todo(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Todo>> {
        let upstream = ctx.data::<UpstreamClient>()?;
        let todo = upstream
            .delete(Resource::Todos, id)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(todo))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostDraft {
    user_id: i64,
    title: String,
    body: String,
}

// Patch bodies carry only the mutable fields the caller supplied. The
// identifier is addressed through the URL and must not appear here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentDraft {
    post_id: i64,
    name: String,
    email: String,
    body: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlbumDraft {
    user_id: i64,
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlbumPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoDraft {
    album_id: i64,
    title: String,
    url: String,
    thumbnail_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    album_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoDraft {
    user_id: i64,
    title: String,
    completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}
