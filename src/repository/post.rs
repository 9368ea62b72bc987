use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::post::Post;
use crate::domain::types::CategoryId;
use crate::models::post::Post as DbPost;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PostReader, PostWriter};

impl PostReader for DieselRepository {
    fn count_posts_by_category(&self, category_id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let total = posts::table
            .filter(posts::category_id.eq(Some(category_id.get())))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }

    fn count_posts_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<HashMap<CategoryId, usize>> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let wanted: Vec<Option<i32>> = category_ids.iter().map(|id| Some(id.get())).collect();
        let rows: Vec<(Option<i32>, i64)> = posts::table
            .filter(posts::category_id.eq_any(wanted))
            .group_by(posts::category_id)
            .select((posts::category_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let mut counts = HashMap::new();
        for (category_id, total) in rows {
            if let Some(raw) = category_id {
                counts.insert(CategoryId::new(raw)?, total as usize);
            }
        }

        Ok(counts)
    }

    fn list_posts_by_categories(&self, category_ids: &[CategoryId]) -> RepositoryResult<Vec<Post>> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let wanted: Vec<Option<i32>> = category_ids.iter().map(|id| Some(id.get())).collect();
        let items = posts::table
            .filter(posts::category_id.eq_any(wanted))
            .order(posts::id.asc())
            .load::<DbPost>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Post>, _>>()?;

        Ok(items)
    }
}

impl PostWriter for DieselRepository {
    fn reassign_posts(&self, from: CategoryId, to: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let moved = diesel::update(posts::table.filter(posts::category_id.eq(Some(from.get()))))
            .set(posts::category_id.eq(Some(to.get())))
            .execute(&mut conn)?;

        Ok(moved)
    }
}
