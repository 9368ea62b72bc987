use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::Post as DomainPost;
use crate::domain::types::{PostTitle, TypeConstraintError};

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub category_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Post> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id.try_into()?,
            title: PostTitle::new(post.title)?,
            slug: post.slug,
            body: post.body,
            category_id: post.category_id.map(TryInto::try_into).transpose()?,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}
