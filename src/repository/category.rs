use diesel::prelude::*;

use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let query_builder = || categories::table.into_boxed::<diesel::sqlite::Sqlite>();

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        // Id order is insertion order, which downstream tree building
        // treats as the canonical sibling order.
        let items = items
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changeset = CategoryChangeset::from(changes);

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn move_category(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
        new_depth: i32,
        descendant_depths: &[(CategoryId, i32)],
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let mut affected =
                diesel::update(categories::table.filter(categories::id.eq(id.get())))
                    .set((
                        categories::parent_id.eq(new_parent_id.map(CategoryId::get)),
                        categories::depth.eq(new_depth),
                        categories::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)?;

            // Descendants keep their parent links; only their depth shifts.
            for (descendant_id, depth) in descendant_depths {
                affected += diesel::update(
                    categories::table.filter(categories::id.eq(descendant_id.get())),
                )
                .set(categories::depth.eq(*depth))
                .execute(conn)?;
            }

            Ok::<usize, diesel::result::Error>(affected)
        })?;

        Ok(affected)
    }

    fn delete_category(
        &self,
        id: CategoryId,
        reassign_posts_to: Option<CategoryId>,
    ) -> RepositoryResult<usize> {
        use crate::schema::{categories, posts};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let node = categories::table
                .filter(categories::id.eq(id.get()))
                .select((categories::parent_id, categories::depth))
                .first::<(Option<i32>, i32)>(conn)
                .optional()?;

            let Some((former_parent_id, former_depth)) = node else {
                return Ok(0);
            };

            if let Some(target) = reassign_posts_to {
                diesel::update(posts::table.filter(posts::category_id.eq(Some(id.get()))))
                    .set(posts::category_id.eq(Some(target.get())))
                    .execute(conn)?;
            }

            // Direct children are adopted by the grandparent at the deleted
            // node's former depth; grandchildren keep their parent links.
            diesel::update(categories::table.filter(categories::parent_id.eq(Some(id.get()))))
                .set((
                    categories::parent_id.eq(former_parent_id),
                    categories::depth.eq(former_depth),
                ))
                .execute(conn)?;

            diesel::delete(categories::table.filter(categories::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }
}
